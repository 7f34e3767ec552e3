//! # divvy-engine
//!
//! Shared-expense balance tracking and minimum-transfer settlement engine.
//!
//! Given a group of participants and the expenses they covered for each
//! other, this engine computes every member's net balance and a short,
//! deterministic list of transfers that settles the whole group.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participants, expenses, groups, money policy
//! - **engine** — Balance aggregation and greedy settlement planning
//! - **export** — CSV and plain-text report rendering
//! - **simulation** — Random group generation for testing and benchmarks

pub mod core;
pub mod engine;
pub mod export;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::expense::Expense;
    pub use crate::core::group::{Group, GroupError};
    pub use crate::core::money::{format_amount, is_settled, round2, SETTLEMENT_EPSILON};
    pub use crate::core::participant::{Participant, ParticipantName};
    pub use crate::engine::balance::{Balance, BalanceAggregator, ParticipantStats, StatsReport};
    pub use crate::engine::settlement::{Settlement, SettlementPlan, SettlementPlanner};
}
