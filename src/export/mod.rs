//! Export module
//!
//! Serializes engine output for people and machines. JSON comes for free
//! from the serde derives on the public types; this module covers the
//! rest.
//!
//! # Components
//!
//! - `csv` - Stats and settlement tables as CSV
//! - `text` - Human-readable combined report

pub mod csv;
pub mod text;

pub use self::csv::{write_settlements_csv, write_stats_csv, ExportError};
pub use self::text::{render_plan, render_report, render_stats};
