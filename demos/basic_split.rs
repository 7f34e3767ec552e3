//! Basic three-person expense split example.
//!
//! Demonstrates how the engine turns a pile of shared expenses into
//! per-person balances and a short list of repayments.

use divvy_engine::core::group::Group;
use divvy_engine::core::participant::ParticipantName;
use divvy_engine::export::{render_plan, render_stats};
use rust_decimal_macros::dec;

fn main() {
    println!("╔═════════════════════════════════════╗");
    println!("║  divvy-engine: Basic Split Example  ║");
    println!("╚═════════════════════════════════════╝\n");

    // --- Scenario 1: A single shared dinner ---
    println!("━━━ Scenario 1: One Dinner ━━━\n");

    let mut group = Group::new("Dinner");
    let alice = ParticipantName::new("Alice");
    let bob = ParticipantName::new("Bob");
    let carol = ParticipantName::new("Carol");

    group.add_participant(alice.clone()).unwrap();
    group.add_participant(bob.clone()).unwrap();
    group.add_participant(carol.clone()).unwrap();

    println!("Expenses:");
    println!("  Dinner: $90.00, paid by Alice, split three ways\n");

    group
        .add_expense(
            "Dinner",
            dec!(90),
            alice.clone(),
            vec![alice.clone(), bob.clone(), carol.clone()],
        )
        .unwrap();

    let report = group.stats();
    let plan = group.settlements();

    println!("{}", report);
    println!("{}", plan);

    // --- Scenario 2: A full weekend ---
    println!("━━━ Scenario 2: The Whole Weekend ━━━\n");

    let mut group = Group::new("Weekend trip");
    group.add_participant(alice.clone()).unwrap();
    group.add_participant(bob.clone()).unwrap();
    group.add_participant(carol.clone()).unwrap();

    let everyone = vec![alice.clone(), bob.clone(), carol.clone()];

    println!("Expenses:");
    println!("  Hotel:  $180.00, paid by Alice, split three ways");
    println!("  Dinner: $90.00,  paid by Alice, split three ways");
    println!("  Fuel:   $60.00,  paid by Bob,   split three ways");
    println!("  Snacks: $24.70,  paid by Carol, shared by Bob and Carol\n");

    group
        .add_expense("Hotel", dec!(180), alice.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense("Dinner", dec!(90), alice.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense("Fuel", dec!(60), bob.clone(), everyone.clone())
        .unwrap();
    group
        .add_expense(
            "Snacks",
            dec!(24.70),
            carol.clone(),
            vec![bob.clone(), carol.clone()],
        )
        .unwrap();

    let report = group.stats();
    let plan = group.settlements();

    print!("{}", render_stats(group.name(), &report));
    println!();
    print!("{}", render_plan(&plan));
    println!();

    // Show individual positions
    println!("━━━ Positions ━━━\n");
    for stats in report.stats() {
        let status = if stats.is_creditor() {
            "CREDITOR"
        } else if stats.is_debtor() {
            "DEBTOR"
        } else {
            "SETTLED"
        };
        println!("  {:<10} {:>10}  [{}]", stats.name, stats.net_balance, status);
    }

    println!("\n━━━ Interpretation ━━━\n");
    println!("  Alice fronted $270.00 of the $354.70 weekend. Two transfers are");
    println!("  enough to square the whole group: each debtor pays Alice");
    println!("  directly, largest balance first.");
}
