//! Simulation module
//!
//! Synthetic data generation for benchmarks and smoke tests.
//!
//! # Components
//!
//! - `random_group` - Random groups with configurable size and amounts

pub mod random_group;

pub use random_group::{generate_random_group, GroupConfig};
