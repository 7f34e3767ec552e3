//! CSV serialization of engine output.
//!
//! All writers are pure over `io::Write`, so they serve files, stdout,
//! and in-memory buffers alike.

use crate::engine::balance::StatsReport;
use crate::engine::settlement::SettlementPlan;
use csv::Writer;
use std::io::Write;
use thiserror::Error;

/// Errors arising while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush output: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a stats report as CSV with columns
/// `participant,total_paid,total_owed,net_balance`.
///
/// Rows follow report order, which is the group's participant order.
pub fn write_stats_csv(report: &StatsReport, output: &mut dyn Write) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["participant", "total_paid", "total_owed", "net_balance"])?;

    for stats in report.stats() {
        writer.write_record(&[
            stats.name.as_str().to_string(),
            format!("{:.2}", stats.total_paid),
            format!("{:.2}", stats.total_owed),
            format!("{:.2}", stats.net_balance),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a settlement plan as CSV with columns `from,to,amount`.
pub fn write_settlements_csv(
    plan: &SettlementPlan,
    output: &mut dyn Write,
) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["from", "to", "amount"])?;

    for transfer in plan.transfers() {
        writer.write_record(&[
            transfer.from().as_str().to_string(),
            transfer.to().as_str().to_string(),
            format!("{:.2}", transfer.amount()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
