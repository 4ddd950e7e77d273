use serde::{Deserialize, Serialize};
use std::fmt;

/// Health state of a single check.
///
/// Variant order is the ranking used for `max`: UNKNOWN < OK < WARNING < CRITICAL.
/// Pass/fail is decided separately (see `RunReport::verdict`), where anything but OK fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Unknown,
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Severity::Ok)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named numeric measurement captured during a probe run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }

    /// Usage percentage, the unit every built-in threshold probe reports in
    pub fn percent(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value, "%")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.1}{}", self.name, self.value, self.unit)
    }
}

/// What a probe observed, before it is bound to the probe's name
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub severity: Severity,
    pub detail: String,
    pub metric: Option<Metric>,
}

impl Observation {
    pub fn new(severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            severity,
            detail: detail.into(),
            metric: None,
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Outcome of one probe in one run. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    name: String,
    severity: Severity,
    detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metric: Option<Metric>,
}

impl CheckResult {
    pub fn new(
        name: impl Into<String>,
        severity: Severity,
        detail: impl Into<String>,
        metric: Option<Metric>,
    ) -> Self {
        Self {
            name: name.into(),
            severity,
            detail: detail.into(),
            metric,
        }
    }

    pub fn from_observation(name: impl Into<String>, observation: Observation) -> Self {
        Self::new(
            name,
            observation.severity,
            observation.detail,
            observation.metric,
        )
    }

    /// A result for a probe that could not produce data
    pub fn unknown(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(name, Severity::Unknown, detail, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn metric(&self) -> Option<&Metric> {
        self.metric.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.severity.is_ok()
    }
}
