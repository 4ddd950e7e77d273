use chrono::{DateTime, Local};
use colored::Colorize;

use crate::core::health::report::TIMESTAMP_FORMAT;
use crate::core::health::{Severity, Verdict};

const RULE_WIDTH: usize = 60;

/// Console styling. Color is an explicit flag, so formatting never touches global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    color: bool,
}

impl SeverityStyle {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn icon(&self, severity: Severity) -> String {
        let icon = match severity {
            Severity::Ok => "✓",
            Severity::Warning => "⚠",
            Severity::Critical => "✗",
            Severity::Unknown => "?",
        };
        self.paint(icon, severity)
    }

    /// Severity name padded to a fixed column before coloring
    pub fn label(&self, severity: Severity) -> String {
        self.paint(&format!("{:<8}", severity.as_str()), severity)
    }

    pub fn verdict(&self, verdict: Verdict) -> String {
        let text = match verdict {
            Verdict::Pass => format!("✓ {}", verdict.summary()),
            Verdict::Fail => format!("✗ {}", verdict.summary()),
        };
        if !self.color {
            return text;
        }
        match verdict {
            Verdict::Pass => text.green().bold().to_string(),
            Verdict::Fail => text.red().bold().to_string(),
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dimmed(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Section header framed by `=` rules
    pub fn header(&self, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("{}\n{}\n{}", rule, self.bold(title), rule)
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if !self.color {
            return text.to_string();
        }
        match severity {
            Severity::Ok => text.green().to_string(),
            Severity::Warning => text.yellow().to_string(),
            Severity::Critical => text.red().to_string(),
            Severity::Unknown => text.magenta().to_string(),
        }
    }
}

impl Default for SeverityStyle {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Format a timestamp the same way the report header does (YYYY-MM-DD HH:MM:SS)
pub fn format_time(time: DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
