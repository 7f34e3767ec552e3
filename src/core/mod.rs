//! Core module
//!
//! Foundational domain types shared by the whole engine.
//!
//! # Components
//!
//! - `participant` - Group members and their names
//! - `expense` - Immutable shared-expense records
//! - `money` - Rounding policy, settlement tolerance, display formatting
//! - `group` - Validated container of participants and expenses

pub mod expense;
pub mod group;
pub mod money;
pub mod participant;

pub use expense::Expense;
pub use group::{Group, GroupError};
pub use participant::{Participant, ParticipantName};
