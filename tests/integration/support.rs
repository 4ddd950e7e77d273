#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use healthmon::core::health::{
    CpuLoad, FilesystemUsage, MemoryAccounting, MemoryUsage, ProcessTable, SpaceUsage,
};
use healthmon::ProbeError;

/// Deterministic stand-in for the host, configured in percentages
#[derive(Clone)]
pub struct FakeHost {
    pub disk_percent: Result<u64, String>,
    pub memory_percent: Option<u64>,
    pub cpu_percent: f64,
    pub processes: HashMap<String, usize>,
}

impl FakeHost {
    pub fn healthy() -> Self {
        Self {
            disk_percent: Ok(10),
            memory_percent: Some(20),
            cpu_percent: 5.0,
            processes: HashMap::new(),
        }
    }

    pub fn with_process(mut self, name: &str, count: usize) -> Self {
        self.processes.insert(name.to_string(), count);
        self
    }
}

impl FilesystemUsage for FakeHost {
    fn usage(&self, path: &Path) -> Result<SpaceUsage, ProbeError> {
        match &self.disk_percent {
            Ok(percent) => Ok(SpaceUsage {
                total_bytes: 100 * 1024 * 1024 * 1024,
                used_bytes: percent * 1024 * 1024 * 1024,
                available_bytes: (100 - percent) * 1024 * 1024 * 1024,
            }),
            Err(cause) => Err(ProbeError::unavailable(format!(
                "cannot read filesystem stats for {}: {}",
                path.display(),
                cause
            ))),
        }
    }
}

impl MemoryAccounting for FakeHost {
    fn memory(&self) -> Result<MemoryUsage, ProbeError> {
        let percent = self
            .memory_percent
            .ok_or_else(|| ProbeError::unavailable("memory accounting is not exposed"))?;
        Ok(MemoryUsage {
            total_bytes: 16 * 100,
            available_bytes: 16 * (100 - percent),
        })
    }
}

impl ProcessTable for FakeHost {
    fn count_running(&self, name: &str) -> Result<usize, ProbeError> {
        Ok(self.processes.get(name).copied().unwrap_or(0))
    }
}

impl CpuLoad for FakeHost {
    fn cpu_usage_percent(&self) -> Result<f64, ProbeError> {
        Ok(self.cpu_percent)
    }
}
