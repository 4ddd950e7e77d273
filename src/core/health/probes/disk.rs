use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::usage_detail;
use crate::core::health::capability::FilesystemUsage;
use crate::core::health::probe::Probe;
use crate::core::health::severity::{Metric, Observation};
use crate::core::health::threshold::Threshold;
use crate::error::{ProbeError, Result};

/// Checks how full the filesystem holding `path` is
pub struct DiskProbe {
    name: String,
    path: PathBuf,
    threshold: Threshold,
    filesystem: Arc<dyn FilesystemUsage>,
}

impl DiskProbe {
    /// Fails when `warning_pct > critical_pct`.
    pub fn new(
        path: impl Into<PathBuf>,
        warning_pct: f64,
        critical_pct: f64,
        filesystem: Arc<dyn FilesystemUsage>,
    ) -> Result<Self> {
        Ok(Self {
            name: "disk".to_string(),
            path: path.into(),
            threshold: Threshold::new(warning_pct, critical_pct)?,
            filesystem,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }
}

impl Probe for DiskProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> std::result::Result<Observation, ProbeError> {
        let usage = self.filesystem.usage(&self.path)?;
        let percent = usage.usage_percent().ok_or_else(|| {
            ProbeError::unavailable(format!(
                "filesystem for {} reports zero capacity",
                self.path.display()
            ))
        })?;

        let severity = self.threshold.evaluate(percent);
        let detail = usage_detail(
            &self.path.display().to_string(),
            percent,
            Some((usage.used_bytes, usage.total_bytes)),
            &self.threshold,
            severity,
        );

        Ok(Observation::new(severity, detail).with_metric(Metric::percent("disk_used", percent)))
    }
}
