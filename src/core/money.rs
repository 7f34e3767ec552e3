use rust_decimal::{Decimal, RoundingStrategy};

/// Tolerance below which a balance counts as settled: one cent.
///
/// Equal splits of cent-denominated amounts rarely come out exact, so every
/// comparison against zero in the engine goes through this tolerance rather
/// than exact equality.
pub const SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Round an amount to two decimal places, halves away from zero.
///
/// This is the single rounding mode used everywhere money leaves the
/// engine: reported totals, net balances, and transfer amounts. Interior
/// arithmetic stays unrounded.
///
/// # Examples
///
/// ```
/// use divvy_engine::core::money::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(3.333333)), dec!(3.33));
/// assert_eq!(round2(dec!(0.005)), dec!(0.01));
/// assert_eq!(round2(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether an amount is within the settlement tolerance of zero.
pub fn is_settled(amount: Decimal) -> bool {
    amount.abs() < SETTLEMENT_EPSILON
}

/// Worst-case rounding drift across `entries` amounts rounded to cents.
///
/// Each independently rounded value can be off by just under half a cent,
/// so a list of balances that "should" sum to zero may legitimately sum to
/// anything inside this allowance.
pub fn rounding_allowance(entries: usize) -> Decimal {
    Decimal::new(5, 3) * Decimal::from(entries)
}

/// Format an amount for display: `$1,234.50`, negatives as `-$1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round2(amount);
    let negative = rounded < Decimal::ZERO;
    let raw = format!("{:.2}", rounded.abs());
    let (whole, cents) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${}.{}", grouped, cents)
    } else {
        format!("${}.{}", grouped, cents)
    }
}
