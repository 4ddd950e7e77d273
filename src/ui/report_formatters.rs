//! Console rendering of a run.
//!
//! Mirrors the report file, with icons and optional color.

use super::formatters::{format_time, SeverityStyle};
use crate::core::health::report::name_width;
use crate::core::health::RunReport;

/// Build the console view of `report`
pub fn format_run_report(report: &RunReport, style: &SeverityStyle) -> String {
    let mut out = String::new();

    out.push_str(&style.header("SYSTEM MONITORING"));
    out.push('\n');
    out.push_str(&style.dimmed(&format!(
        "Started: {}",
        format_time(report.generated_at())
    )));
    out.push_str("\n\n");

    let width = name_width(report.results());
    for result in report.results() {
        out.push_str(&format!(
            "  {} {:<width$}  {}  {}\n",
            style.icon(result.severity()),
            result.name(),
            style.label(result.severity()),
            result.detail(),
            width = width
        ));
    }
    out.push('\n');

    out.push_str(&style.header("SUMMARY"));
    out.push('\n');
    out.push_str(&format!(
        "Checks passed: {}/{}\n\n",
        report.passed(),
        report.total()
    ));
    out.push_str(&style.verdict(report.verdict()));
    out.push('\n');

    let failed: Vec<_> = report.failed().collect();
    if !failed.is_empty() {
        out.push_str("\nFailed checks:\n");
        for result in failed {
            out.push_str(&format!(
                "  {} {} ({}: {})\n",
                style.icon(result.severity()),
                result.name().to_uppercase(),
                result.severity(),
                result.detail()
            ));
        }
    }

    out
}
