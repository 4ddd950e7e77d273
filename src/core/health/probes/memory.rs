use std::sync::Arc;

use super::usage_detail;
use crate::core::health::capability::MemoryAccounting;
use crate::core::health::probe::Probe;
use crate::core::health::severity::{Metric, Observation};
use crate::core::health::threshold::Threshold;
use crate::error::{ProbeError, Result};

/// Checks host memory pressure as `(total - available) / total`
pub struct MemoryProbe {
    name: String,
    threshold: Threshold,
    memory: Arc<dyn MemoryAccounting>,
}

impl MemoryProbe {
    pub fn new(
        warning_pct: f64,
        critical_pct: f64,
        memory: Arc<dyn MemoryAccounting>,
    ) -> Result<Self> {
        Ok(Self {
            name: "memory".to_string(),
            threshold: Threshold::new(warning_pct, critical_pct)?,
            memory,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Probe for MemoryProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> std::result::Result<Observation, ProbeError> {
        let usage = self.memory.memory()?;
        let percent = usage
            .usage_percent()
            .ok_or_else(|| ProbeError::unavailable("cannot check memory on this system"))?;

        let severity = self.threshold.evaluate(percent);
        let detail = usage_detail(
            "memory",
            percent,
            Some((usage.used_bytes(), usage.total_bytes)),
            &self.threshold,
            severity,
        );

        Ok(Observation::new(severity, detail).with_metric(Metric::percent("memory_used", percent)))
    }
}
