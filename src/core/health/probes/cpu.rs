use std::sync::Arc;

use super::usage_detail;
use crate::core::health::capability::CpuLoad;
use crate::core::health::probe::Probe;
use crate::core::health::severity::{Metric, Observation};
use crate::core::health::threshold::Threshold;
use crate::error::{ProbeError, Result};

/// Checks global CPU utilisation
pub struct CpuProbe {
    name: String,
    threshold: Threshold,
    cpu: Arc<dyn CpuLoad>,
}

impl CpuProbe {
    pub fn new(warning_pct: f64, critical_pct: f64, cpu: Arc<dyn CpuLoad>) -> Result<Self> {
        Ok(Self {
            name: "cpu".to_string(),
            threshold: Threshold::new(warning_pct, critical_pct)?,
            cpu,
        })
    }
}

impl Probe for CpuProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> std::result::Result<Observation, ProbeError> {
        let percent = self.cpu.cpu_usage_percent()?;
        if !percent.is_finite() {
            return Err(ProbeError::query(format!(
                "CPU usage sample is not a number: {}",
                percent
            )));
        }

        let severity = self.threshold.evaluate(percent);
        let detail = usage_detail("cpu", percent, None, &self.threshold, severity);

        Ok(Observation::new(severity, detail).with_metric(Metric::percent("cpu_used", percent)))
    }
}
