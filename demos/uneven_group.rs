//! Uneven flat-share example with several creditors and debtors.
//!
//! Demonstrates the greedy matching order: largest debtor pays largest
//! creditor first, and the plan never exceeds creditors + debtors - 1
//! transfers.

use divvy_engine::core::group::Group;
use divvy_engine::core::participant::ParticipantName;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════╗");
    println!("║  divvy-engine: Uneven Group Example  ║");
    println!("╚══════════════════════════════════════╝\n");

    let mut group = Group::new("Flat share, March");

    let dana = ParticipantName::new("Dana");
    let eli = ParticipantName::new("Eli");
    let fay = ParticipantName::new("Fay");
    let gus = ParticipantName::new("Gus");
    let hana = ParticipantName::new("Hana");

    for name in [&dana, &eli, &fay, &gus, &hana] {
        group.add_participant(name.clone()).unwrap();
    }

    let everyone = vec![
        dana.clone(),
        eli.clone(),
        fay.clone(),
        gus.clone(),
        hana.clone(),
    ];

    println!("Expenses:");
    println!("  Rent:       $1500.00, paid by Dana, split five ways");
    println!("  Car rental: $600.00,  paid by Fay,  split five ways");
    println!("  Groceries:  $240.00,  paid by Eli,  split five ways");
    println!("  Concert:    $150.00,  paid by Gus,  shared by Gus, Hana and Eli");
    println!("  Pizza:      $60.00,   paid by Eli,  shared by Eli and Gus\n");

    group
        .add_expense("Rent", dec!(1500), dana.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense("Car rental", dec!(600), fay.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense("Groceries", dec!(240), eli.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense(
            "Concert",
            dec!(150),
            gus.clone(),
            vec![gus.clone(), hana.clone(), eli.clone()],
        )
        .unwrap();
    group
        .add_expense(
            "Pizza",
            dec!(60),
            eli.clone(),
            vec![eli.clone(), gus.clone()],
        )
        .unwrap();

    let report = group.stats();
    let plan = group.settlements();

    println!("{}", report);
    println!("{}", plan);

    // Verify the plan against the balances it was built from
    let creditors = report.stats().iter().filter(|s| s.is_creditor()).count();
    let debtors = report.stats().iter().filter(|s| s.is_debtor()).count();

    println!("━━━ Verification ━━━\n");
    println!("  Transfers:       {}", plan.len());
    println!("  Upper bound:     {} (creditors + debtors - 1)", creditors + debtors - 1);
    println!("  Amount moved:    ${}", plan.transfer_total());
    println!("  Fully settles:   {}", plan.settles(&report.balances()));

    println!("\n━━━ Interpretation ━━━\n");
    println!("  Hana and Gus owe the most, so both pay Dana in full. Eli's debt");
    println!("  is the only one split across two people: it finishes off Dana's");
    println!("  balance and then covers Fay's. Five flatmates, four transfers.");
}
