//! Plain-text report rendering.

use crate::core::money::format_amount;
use crate::engine::balance::StatsReport;
use crate::engine::settlement::SettlementPlan;

/// Render a stats table with one row per participant.
pub fn render_stats(title: &str, report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    out.push_str(&format!(
        "{:<16} {:>12} {:>12} {:>12} {:>7}\n",
        "Participant", "Paid", "Owed", "Balance", "Share"
    ));
    for stats in report.stats() {
        out.push_str(&format!(
            "{:<16} {:>12} {:>12} {:>12} {:>6.1}%\n",
            stats.name.as_str(),
            format_amount(stats.total_paid),
            format_amount(stats.total_owed),
            format_amount(stats.net_balance),
            report.paid_share_percent(&stats.name),
        ));
    }

    out.push_str(&format!(
        "\nTotal spent: {}\n",
        format_amount(report.total_spent())
    ));
    out
}

/// Render the settlement plan as a short payment list.
pub fn render_plan(plan: &SettlementPlan) -> String {
    if plan.is_empty() {
        return "Everyone is settled up.\n".to_string();
    }

    let mut out = String::from("Suggested settlements:\n");
    for transfer in plan.transfers() {
        out.push_str(&format!(
            "  {} pays {} {}\n",
            transfer.from(),
            transfer.to(),
            format_amount(transfer.amount())
        ));
    }
    out.push_str(&format!(
        "Total: {} transfers moving {}\n",
        plan.len(),
        format_amount(plan.transfer_total())
    ));
    out
}

/// Render the combined report: stats table followed by the plan.
pub fn render_report(title: &str, report: &StatsReport, plan: &SettlementPlan) -> String {
    let mut out = render_stats(title, report);
    out.push('\n');
    out.push_str(&render_plan(plan));
    out
}
