//! Run results and the flat text report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::severity::{CheckResult, Severity};
use crate::error::{HealthError, Result};

pub const REPORT_TITLE: &str = "SYSTEM MONITORING REPORT";
/// Timestamp layout used in the report header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 60;

/// Binary outcome of a run: PASS only when every check is OK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Verdict::Pass => "ALL CHECKS PASSED",
            Verdict::Fail => "SOME CHECKS FAILED",
        }
    }

    /// Process exit status: 0 on PASS, 1 on FAIL
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}

/// Results of one monitoring pass, in registration order
#[derive(Debug, Clone)]
pub struct RunReport {
    generated_at: DateTime<Local>,
    results: Vec<CheckResult>,
}

impl RunReport {
    pub fn new(generated_at: DateTime<Local>, results: Vec<CheckResult>) -> Self {
        Self {
            generated_at,
            results,
        }
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity() == severity)
            .count()
    }

    pub fn verdict(&self) -> Verdict {
        if self.results.iter().all(|r| r.is_ok()) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Highest severity by `Severity` ranking, `None` for an empty run
    pub fn highest_severity(&self) -> Option<Severity> {
        self.results.iter().map(|r| r.severity()).max()
    }

    pub fn to_json(&self) -> Result<String> {
        let view = ReportJson {
            generated_at: self.generated_at.to_rfc3339(),
            verdict: self.verdict(),
            total: self.total(),
            passed: self.passed(),
            results: &self.results,
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    generated_at: String,
    verdict: Verdict,
    total: usize,
    passed: usize,
    results: &'a [CheckResult],
}

/// Render the report as plain text.
///
/// Apart from the `Generated:` line the output depends only on the results.
pub fn render(report: &RunReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let width = name_width(report.results());
    let mut out = String::new();

    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "Generated: {}\n",
        report.generated_at().format(TIMESTAMP_FORMAT)
    ));
    out.push('\n');

    out.push_str("RESULTS:\n");
    for result in report.results() {
        out.push_str(&format!(
            "  {:<width$}  {:<8}  {}\n",
            result.name(),
            result.severity().as_str(),
            result.detail(),
            width = width
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "Checks passed: {}/{}\n",
        report.passed(),
        report.total()
    ));
    out.push_str(&format!("OVERALL STATUS: {}\n", report.verdict().summary()));

    out
}

/// Column width for check names
pub fn name_width(results: &[CheckResult]) -> usize {
    results.iter().map(|r| r.name().chars().count()).max().unwrap_or(0)
}

/// Write the rendered report to `path`, replacing any previous content.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let text = render(report);

    let file = File::create(path).map_err(|e| HealthError::report(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| HealthError::report(path, e))?;

    log::info!("Report written to {}", path.display());
    Ok(())
}
