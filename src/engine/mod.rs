//! Engine module
//!
//! The two pure computations at the heart of the crate.
//!
//! # Components
//!
//! - `balance` - Fold an expense history into per-participant totals
//! - `settlement` - Greedy largest-first planning of settling transfers

pub mod balance;
pub mod settlement;

pub use balance::{Balance, BalanceAggregator, ParticipantStats, StatsReport};
pub use settlement::{Settlement, SettlementPlan, SettlementPlanner};
