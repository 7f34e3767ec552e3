use crate::core::expense::Expense;
use crate::core::participant::{Participant, ParticipantName};
use crate::engine::balance::{BalanceAggregator, StatsReport};
use crate::engine::settlement::{SettlementPlan, SettlementPlanner};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from group editing operations.
#[derive(Debug, Error, PartialEq)]
pub enum GroupError {
    #[error("participant name cannot be empty")]
    EmptyName,
    #[error("participant '{0}' already exists in the group")]
    DuplicateParticipant(String),
    #[error("participant '{0}' is not a member of the group")]
    UnknownParticipant(String),
    #[error("expense {0} was not found in the group")]
    UnknownExpense(Uuid),
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("an expense must involve at least one participant")]
    EmptyInvolved,
}

/// An expense group: the participants and the expenses they share.
///
/// The group is the validated entry point for user data. Everything it
/// accepts satisfies the engine's input contract, so balance and
/// settlement computation downstream never has to fail.
///
/// Removing a participant deliberately leaves their name behind in old
/// expenses; the balance engine drops those references on the next
/// recomputation.
///
/// # Examples
///
/// ```
/// use divvy_engine::core::group::Group;
/// use divvy_engine::core::participant::ParticipantName;
/// use rust_decimal_macros::dec;
///
/// let mut group = Group::new("Road trip");
/// group.add_participant(ParticipantName::new("Alice")).unwrap();
/// group.add_participant(ParticipantName::new("Bob")).unwrap();
///
/// group.add_expense(
///     "Fuel",
///     dec!(80),
///     ParticipantName::new("Alice"),
///     vec![ParticipantName::new("Alice"), ParticipantName::new("Bob")],
/// ).unwrap();
///
/// let plan = group.settlements();
/// assert_eq!(plan.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    name: String,
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            participants: Vec::new(),
            expenses: Vec::new(),
        }
    }

    /// Assemble a group from pre-built parts. Callers guarantee name
    /// uniqueness and referential consistency.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        participants: Vec<Participant>,
        expenses: Vec<Expense>,
    ) -> Self {
        Self {
            name: name.into(),
            participants,
            expenses,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Whether a name belongs to a current member. Exact match only.
    pub fn is_member(&self, name: &ParticipantName) -> bool {
        self.participants.iter().any(|p| p.name() == name)
    }

    /// Add a member. Names must be non-blank and unique ignoring case,
    /// so "alice" cannot join a group that already has "Alice".
    pub fn add_participant(&mut self, name: ParticipantName) -> Result<Uuid, GroupError> {
        if name.as_str().trim().is_empty() {
            return Err(GroupError::EmptyName);
        }
        let lowered = name.as_str().to_lowercase();
        if self
            .participants
            .iter()
            .any(|p| p.name().as_str().to_lowercase() == lowered)
        {
            return Err(GroupError::DuplicateParticipant(name.as_str().to_string()));
        }
        let participant = Participant::new(name);
        let id = participant.id();
        self.participants.push(participant);
        Ok(id)
    }

    /// Remove a member. Their name stays in any recorded expenses, where
    /// the balance engine will ignore it from now on.
    pub fn remove_participant(
        &mut self,
        name: &ParticipantName,
    ) -> Result<Participant, GroupError> {
        match self.participants.iter().position(|p| p.name() == name) {
            Some(i) => Ok(self.participants.remove(i)),
            None => Err(GroupError::UnknownParticipant(name.as_str().to_string())),
        }
    }

    /// Record an expense dated now.
    pub fn add_expense(
        &mut self,
        description: impl Into<String>,
        amount: Decimal,
        payer: ParticipantName,
        involved: Vec<ParticipantName>,
    ) -> Result<Uuid, GroupError> {
        self.add_expense_on(description, amount, payer, involved, Utc::now())
    }

    /// Record an expense with an explicit date.
    ///
    /// The amount must be positive, at least one participant must share
    /// the cost, and every referenced name must currently be a member.
    pub fn add_expense_on(
        &mut self,
        description: impl Into<String>,
        amount: Decimal,
        payer: ParticipantName,
        involved: Vec<ParticipantName>,
        date: DateTime<Utc>,
    ) -> Result<Uuid, GroupError> {
        if amount <= Decimal::ZERO {
            return Err(GroupError::NonPositiveAmount);
        }
        if involved.is_empty() {
            return Err(GroupError::EmptyInvolved);
        }
        if !self.is_member(&payer) {
            return Err(GroupError::UnknownParticipant(payer.as_str().to_string()));
        }
        for name in &involved {
            if !self.is_member(name) {
                return Err(GroupError::UnknownParticipant(name.as_str().to_string()));
            }
        }

        let expense = Expense::new(description, amount, payer, involved).with_date(date);
        let id = expense.id();
        self.expenses.push(expense);
        Ok(id)
    }

    /// Delete an expense by id, returning it.
    pub fn remove_expense(&mut self, id: Uuid) -> Result<Expense, GroupError> {
        match self.expenses.iter().position(|e| e.id() == id) {
            Some(i) => Ok(self.expenses.remove(i)),
            None => Err(GroupError::UnknownExpense(id)),
        }
    }

    /// Sum of all recorded expense amounts.
    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// Current per-participant statistics, recomputed from scratch.
    pub fn stats(&self) -> StatsReport {
        BalanceAggregator::compute_stats(&self.participants, &self.expenses)
    }

    /// Current settlement plan, recomputed from scratch.
    pub fn settlements(&self) -> SettlementPlan {
        SettlementPlanner::compute_settlements(&self.stats().balances())
    }
}
