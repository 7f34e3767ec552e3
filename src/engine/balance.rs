use crate::core::expense::Expense;
use crate::core::money::{self, format_amount, round2};
use crate::core::participant::{Participant, ParticipantName};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-participant totals derived from an expense history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub name: ParticipantName,
    /// Everything this participant fronted, rounded to cents.
    pub total_paid: Decimal,
    /// The sum of this participant's equal shares, rounded to cents.
    pub total_owed: Decimal,
    /// Paid minus owed, computed from the unrounded totals and then rounded.
    pub net_balance: Decimal,
}

impl ParticipantStats {
    /// The group owes this participant money.
    pub fn is_creditor(&self) -> bool {
        self.net_balance > money::SETTLEMENT_EPSILON
    }

    /// This participant owes the group money.
    pub fn is_debtor(&self) -> bool {
        self.net_balance < -money::SETTLEMENT_EPSILON
    }
}

/// A participant's net position: positive means the group owes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub name: ParticipantName,
    pub amount: Decimal,
}

impl Balance {
    pub fn new(name: ParticipantName, amount: Decimal) -> Self {
        Self { name, amount }
    }
}

/// Statistics for a whole group, one entry per participant.
///
/// Entries keep the participant input order, so reports and exports are
/// stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    stats: Vec<ParticipantStats>,
}

impl StatsReport {
    pub fn stats(&self) -> &[ParticipantStats] {
        &self.stats
    }

    pub fn get(&self, name: &ParticipantName) -> Option<&ParticipantStats> {
        self.stats.iter().find(|s| &s.name == name)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The net positions in report order, ready for settlement planning.
    pub fn balances(&self) -> Vec<Balance> {
        self.stats
            .iter()
            .map(|s| Balance::new(s.name.clone(), s.net_balance))
            .collect()
    }

    /// Total amount credited across the group.
    pub fn total_spent(&self) -> Decimal {
        self.stats.iter().map(|s| s.total_paid).sum()
    }

    /// Sum of all net balances.
    ///
    /// Zero for exact splits; uneven splits leave cent-level drift from
    /// per-entry rounding.
    pub fn net_total(&self) -> Decimal {
        self.stats.iter().map(|s| s.net_balance).sum()
    }

    /// Whether the net balances sum to zero within the rounding allowance.
    pub fn is_balanced(&self) -> bool {
        self.net_total().abs() <= money::rounding_allowance(self.stats.len())
    }

    /// The share of total spending this participant fronted, in percent.
    pub fn paid_share_percent(&self, name: &ParticipantName) -> f64 {
        let total = self.total_spent();
        if total == Decimal::ZERO {
            return 0.0;
        }
        let paid = match self.get(name) {
            Some(stats) => stats.total_paid,
            None => return 0.0,
        };
        // Convert to f64 for percentage display
        let pct = paid * Decimal::from(100) / total;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for StatsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Group Statistics ===")?;
        for s in &self.stats {
            writeln!(
                f,
                "{:<16} paid {:>12}  owed {:>12}  net {:>12}",
                s.name.as_str(),
                format_amount(s.total_paid),
                format_amount(s.total_owed),
                format_amount(s.net_balance),
            )?;
        }
        writeln!(f, "Total spent:    {}", format_amount(self.total_spent()))?;
        writeln!(f, "Balanced:       {}", self.is_balanced())?;
        Ok(())
    }
}

/// The balance aggregation engine.
///
/// Folds a group's expense history into per-participant paid/owed totals
/// and net balances.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Compute per-participant statistics over an expense history.
    ///
    /// # Algorithm
    ///
    /// 1. Start every participant at zero paid and zero owed.
    /// 2. For each expense, credit the payer with the full amount and
    ///    charge each involved participant one equal share.
    /// 3. Round each reported figure to cents once, at the end.
    ///
    /// Expenses may reference names missing from `participants` (after a
    /// member was removed, for instance); those references are dropped
    /// without affecting anyone else. Expense order never changes the
    /// result, and the report lists participants in input order.
    pub fn compute_stats(participants: &[Participant], expenses: &[Expense]) -> StatsReport {
        log::debug!(
            "computing stats: {} participants, {} expenses",
            participants.len(),
            expenses.len()
        );

        let mut paid = vec![Decimal::ZERO; participants.len()];
        let mut owed = vec![Decimal::ZERO; participants.len()];
        let mut index: HashMap<&ParticipantName, usize> = HashMap::new();
        for (i, p) in participants.iter().enumerate() {
            index.entry(p.name()).or_insert(i);
        }

        for expense in expenses {
            debug_assert!(
                !expense.involved().is_empty(),
                "expense '{}' involves nobody",
                expense.description()
            );
            if expense.involved().is_empty() {
                log::warn!(
                    "skipping expense '{}': no involved participants",
                    expense.description()
                );
                continue;
            }

            match index.get(expense.payer()) {
                Some(&i) => paid[i] += expense.amount(),
                None => log::warn!(
                    "payer '{}' is not a group member, dropping credit for '{}'",
                    expense.payer(),
                    expense.description()
                ),
            }

            let share = expense.share_per_person();
            for name in expense.involved() {
                match index.get(name) {
                    Some(&i) => owed[i] += share,
                    None => log::warn!(
                        "'{}' is not a group member, dropping their share of '{}'",
                        name,
                        expense.description()
                    ),
                }
            }
        }

        let stats = participants
            .iter()
            .enumerate()
            .map(|(i, p)| ParticipantStats {
                name: p.name().clone(),
                total_paid: round2(paid[i]),
                total_owed: round2(owed[i]),
                net_balance: round2(paid[i] - owed[i]),
            })
            .collect();

        StatsReport { stats }
    }
}
