use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// Space accounting for the filesystem holding a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    /// Space available to unprivileged users
    pub available_bytes: u64,
}

impl SpaceUsage {
    /// Used share of the space visible to unprivileged users, as `df` reports it
    pub fn usage_percent(&self) -> Option<f64> {
        let visible = self.used_bytes.saturating_add(self.available_bytes);
        if visible == 0 {
            None
        } else {
            Some(self.used_bytes as f64 / visible as f64 * 100.0)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemoryUsage {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    /// `(total - available) / total * 100`, `None` when the host reports no memory
    pub fn usage_percent(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            None
        } else {
            Some(self.used_bytes() as f64 / self.total_bytes as f64 * 100.0)
        }
    }
}

/// Filesystem usage query for a path.
///
/// Implementations are provided in the platform layer.
pub trait FilesystemUsage: Send + Sync {
    fn usage(&self, path: &Path) -> Result<SpaceUsage, ProbeError>;
}

/// Host memory accounting
pub trait MemoryAccounting: Send + Sync {
    fn memory(&self) -> Result<MemoryUsage, ProbeError>;
}

/// Process table query
pub trait ProcessTable: Send + Sync {
    /// Number of running processes whose name is exactly `name`
    fn count_running(&self, name: &str) -> Result<usize, ProbeError>;
}

/// Global CPU utilisation sampling
pub trait CpuLoad: Send + Sync {
    fn cpu_usage_percent(&self) -> Result<f64, ProbeError>;
}

/// Everything the built-in probes need from the host
pub trait HostCapabilities: FilesystemUsage + MemoryAccounting + ProcessTable + CpuLoad {}

impl<T> HostCapabilities for T where T: FilesystemUsage + MemoryAccounting + ProcessTable + CpuLoad {}
