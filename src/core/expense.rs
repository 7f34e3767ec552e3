use crate::core::participant::ParticipantName;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A shared expense paid by one participant on behalf of several.
///
/// The `payer` fronted the full `amount`; everyone in `involved` owes an
/// equal share of it. This is the atomic input record of the engine.
///
/// Expenses are immutable once created. Balance computation folds over
/// collections of expenses to derive per-participant totals.
///
/// # Examples
///
/// ```
/// use divvy_engine::core::expense::Expense;
/// use divvy_engine::core::participant::ParticipantName;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     "Dinner",
///     dec!(90),
///     ParticipantName::new("Alice"),
///     vec![
///         ParticipantName::new("Alice"),
///         ParticipantName::new("Bob"),
///         ParticipantName::new("Carol"),
///     ],
/// );
///
/// assert_eq!(dinner.share_per_person(), dec!(30));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// Human-readable description ("Hotel", "Groceries").
    description: String,
    /// The full amount paid. Must be positive.
    amount: Decimal,
    /// Who fronted the money.
    payer: ParticipantName,
    /// Who shares the cost, in equal parts. Never empty, each name once.
    involved: Vec<ParticipantName>,
    /// When the expense occurred.
    date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated now.
    ///
    /// `involved` is a set of names: listing someone more than once still
    /// charges them a single share.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive or `involved` is empty.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        payer: ParticipantName,
        involved: Vec<ParticipantName>,
    ) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Expense amount must be positive, got {}",
            amount
        );
        assert!(
            !involved.is_empty(),
            "Expense must involve at least one participant"
        );
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            payer,
            involved: dedup_names(involved),
            date: Utc::now(),
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        payer: ParticipantName,
        involved: Vec<ParticipantName>,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        assert!(!involved.is_empty());
        Self {
            id,
            description: description.into(),
            amount,
            payer,
            involved: dedup_names(involved),
            date: Utc::now(),
        }
    }

    /// Set the expense date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payer(&self) -> &ParticipantName {
        &self.payer
    }

    pub fn involved(&self) -> &[ParticipantName] {
        &self.involved
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// The equal share each involved participant owes.
    ///
    /// Division is carried out at full decimal precision; rounding happens
    /// once, when totals are reported.
    pub fn share_per_person(&self) -> Decimal {
        self.amount / Decimal::from(self.involved.len())
    }

    /// Whether the given name is among the people sharing this expense.
    pub fn involves(&self, name: &ParticipantName) -> bool {
        self.involved.iter().any(|n| n == name)
    }
}

/// Keep the first occurrence of each name, dropping later repeats.
fn dedup_names(mut names: Vec<ParticipantName>) -> Vec<ParticipantName> {
    let mut seen = HashSet::with_capacity(names.len());
    names.retain(|n| seen.insert(n.clone()));
    names
}
