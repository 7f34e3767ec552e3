//! Random group generation.
//!
//! Produces synthetic expense groups to exercise the engine in benchmarks
//! and CLI smoke tests.

use crate::core::expense::Expense;
use crate::core::group::Group;
use crate::core::money::round2;
use crate::core::participant::{Participant, ParticipantName};
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random expense group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub participant_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            participant_count: 6,
            expense_count: 20,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
        }
    }
}

/// Generate a random expense group.
///
/// Each expense picks a random payer, a random non-empty subset of members
/// to share the cost, a cent-rounded amount inside the configured range,
/// and a date within the last month.
///
/// # Panics
///
/// Panics if `participant_count` is zero.
pub fn generate_random_group(config: &GroupConfig) -> Group {
    assert!(
        config.participant_count > 0,
        "Group generation requires at least one participant"
    );
    let mut rng = rand::thread_rng();

    let participants: Vec<Participant> = (0..config.participant_count)
        .map(|i| Participant::new(ParticipantName::new(format!("MEMBER-{:03}", i))))
        .collect();

    let mut expenses = Vec::with_capacity(config.expense_count);
    for n in 0..config.expense_count {
        let payer = participants[rng.gen_range(0..participants.len())]
            .name()
            .clone();

        let mut indices: Vec<usize> = (0..participants.len()).collect();
        indices.shuffle(&mut rng);
        indices.truncate(rng.gen_range(1..=participants.len()));
        indices.sort_unstable();
        let involved: Vec<ParticipantName> = indices
            .iter()
            .map(|&i| participants[i].name().clone())
            .collect();

        // Generate random amount between min and max
        let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(5.0);
        let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(500.0);
        let amount_f64 = if max_f64 > min_f64 {
            rng.gen_range(min_f64..max_f64)
        } else {
            min_f64
        };
        let amount = round2(Decimal::from_f64_retain(amount_f64).unwrap_or(Decimal::ONE));

        let date = Utc::now() - Duration::days(rng.gen_range(0i64..30));

        if amount > Decimal::ZERO {
            expenses.push(
                Expense::new(format!("EXPENSE-{:03}", n), amount, payer, involved)
                    .with_date(date),
            );
        }
    }

    Group::from_parts("GENERATED-GROUP", participants, expenses)
}
