use crate::core::money::{format_amount, is_settled, round2, rounding_allowance, SETTLEMENT_EPSILON};
use crate::core::participant::ParticipantName;
use crate::engine::balance::Balance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single suggested payment: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    from: ParticipantName,
    to: ParticipantName,
    /// Always positive and rounded to cents.
    amount: Decimal,
}

impl Settlement {
    /// Create a settlement transfer.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive or if `from` and `to` coincide.
    pub fn new(from: ParticipantName, to: ParticipantName, amount: Decimal) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Settlement amount must be positive, got {}",
            amount
        );
        assert!(from != to, "A settlement cannot pay a participant back to themselves");
        Self { from, to, amount }
    }

    pub fn from(&self) -> &ParticipantName {
        &self.from
    }

    pub fn to(&self) -> &ParticipantName {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, format_amount(self.amount))
    }
}

/// An ordered list of transfers that settles a set of balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    transfers: Vec<Settlement>,
}

impl SettlementPlan {
    pub fn transfers(&self) -> &[Settlement] {
        &self.transfers
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total money moved by the plan.
    pub fn transfer_total(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Verify that applying every transfer leaves each balance within one
    /// cent of zero.
    ///
    /// Fails only when the input balances themselves did not sum to zero;
    /// the leftover then sits with whoever the plan could not match.
    pub fn settles(&self, balances: &[Balance]) -> bool {
        let mut remaining: HashMap<&ParticipantName, Decimal> =
            balances.iter().map(|b| (&b.name, b.amount)).collect();

        for t in &self.transfers {
            if let Some(owed) = remaining.get_mut(&t.from) {
                *owed += t.amount;
            }
            if let Some(owed) = remaining.get_mut(&t.to) {
                *owed -= t.amount;
            }
        }

        remaining.values().all(|v| v.abs() <= SETTLEMENT_EPSILON)
    }
}

impl fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        if self.transfers.is_empty() {
            writeln!(f, "All balances settled, no transfers needed.")?;
            return Ok(());
        }
        for t in &self.transfers {
            writeln!(
                f,
                "  {} -> {}  {}",
                t.from,
                t.to,
                format_amount(t.amount)
            )?;
        }
        writeln!(f, "Transfers:      {}", self.transfers.len())?;
        writeln!(f, "Total moved:    {}", format_amount(self.transfer_total()))?;
        Ok(())
    }
}

/// The settlement planning engine.
///
/// Matches debtors against creditors greedily, largest first, so that the
/// people with the biggest positions are dealt with in as few payments as
/// possible.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Compute a transfer plan for a set of net balances.
    ///
    /// # Algorithm
    ///
    /// 1. Split the balances into creditors (above one cent) and debtors
    ///    (below minus one cent); anything inside the tolerance is already
    ///    settled and ignored.
    /// 2. Sort creditors by descending amount and debtors by ascending
    ///    amount. Both sorts are stable, so equal amounts keep their input
    ///    order and the plan is fully deterministic.
    /// 3. Walk both lists with a cursor each: the current debtor pays the
    ///    current creditor `round2(min(credit, debt))`, both positions are
    ///    re-rounded, and any position now inside the tolerance retires its
    ///    cursor.
    /// 4. Stop when either list is exhausted.
    ///
    /// The plan never contains more than `creditors + debtors - 1`
    /// transfers. If the balances do not sum to zero the leftover stays
    /// with the last unmatched side; the plan is still returned and the
    /// imbalance is logged.
    pub fn compute_settlements(balances: &[Balance]) -> SettlementPlan {
        log::debug!("planning settlements for {} balances", balances.len());

        let total: Decimal = balances.iter().map(|b| b.amount).sum();
        debug_assert!(
            total.abs() <= rounding_allowance(balances.len()),
            "input balances sum to {}, outside the rounding allowance",
            total
        );

        let mut creditors: Vec<Balance> = balances
            .iter()
            .filter(|b| b.amount > SETTLEMENT_EPSILON)
            .cloned()
            .collect();
        let mut debtors: Vec<Balance> = balances
            .iter()
            .filter(|b| b.amount < -SETTLEMENT_EPSILON)
            .cloned()
            .collect();

        creditors.sort_by(|a, b| b.amount.cmp(&a.amount));
        debtors.sort_by(|a, b| a.amount.cmp(&b.amount));

        let mut transfers = Vec::new();
        let mut ci = 0;
        let mut di = 0;

        while ci < creditors.len() && di < debtors.len() {
            let credit = creditors[ci].amount;
            let debt = -debtors[di].amount;
            let amount = round2(credit.min(debt));

            transfers.push(Settlement::new(
                debtors[di].name.clone(),
                creditors[ci].name.clone(),
                amount,
            ));

            creditors[ci].amount = round2(credit - amount);
            debtors[di].amount = round2(debtors[di].amount + amount);

            if creditors[ci].amount < SETTLEMENT_EPSILON {
                ci += 1;
            }
            if debtors[di].amount > -SETTLEMENT_EPSILON {
                di += 1;
            }
        }

        let residual: Decimal = creditors[ci..].iter().map(|b| b.amount).sum::<Decimal>()
            + debtors[di..].iter().map(|b| b.amount).sum::<Decimal>();
        if !is_settled(residual) {
            log::warn!(
                "settlement plan leaves {} unmatched; input balances did not sum to zero",
                residual
            );
        }

        SettlementPlan { transfers }
    }
}
