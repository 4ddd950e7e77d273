use std::sync::Arc;

use crate::core::health::capability::ProcessTable;
use crate::core::health::probe::Probe;
use crate::core::health::severity::{Metric, Observation, Severity};
use crate::error::{HealthError, ProbeError, Result};

/// Checks that at least one process named exactly `process_name` is running.
///
/// Binary check: a missing dependency is CRITICAL, there is no WARNING tier.
pub struct ProcessProbe {
    name: String,
    process_name: String,
    processes: Arc<dyn ProcessTable>,
}

impl ProcessProbe {
    pub fn new(process_name: impl Into<String>, processes: Arc<dyn ProcessTable>) -> Result<Self> {
        let process_name = process_name.into();
        if process_name.trim().is_empty() {
            return Err(HealthError::config("process name cannot be empty"));
        }

        Ok(Self {
            name: process_name.clone(),
            process_name,
            processes,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }
}

impl Probe for ProcessProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> std::result::Result<Observation, ProbeError> {
        let count = self.processes.count_running(&self.process_name)?;
        let metric = Metric::new("process_count", count as f64, "processes");

        let observation = match count {
            0 => Observation::new(Severity::Critical, "not running"),
            1 => Observation::new(Severity::Ok, "running (1 process)"),
            n => Observation::new(Severity::Ok, format!("running ({} processes)", n)),
        };

        Ok(observation.with_metric(metric))
    }
}
