//! Health-check core.
//!
//! Probes inspect the host through injected capabilities, the registry keeps
//! them in order, the runner executes them with failure isolation and the
//! report module renders the outcome.

pub mod capability;
pub mod probe;
pub mod probes;
pub mod registry;
pub mod report;
pub mod runner;
mod severity;
pub mod threshold;

pub use capability::{
    CpuLoad, FilesystemUsage, HostCapabilities, MemoryAccounting, MemoryUsage, ProcessTable,
    SpaceUsage,
};
pub use probe::Probe;
pub use probes::{CpuProbe, DiskProbe, MemoryProbe, ProcessProbe};
pub use registry::CheckRegistry;
pub use report::{render, write_report, RunReport, Verdict};
pub use runner::{Runner, RunnerConfig};
pub use severity::{CheckResult, Metric, Observation, Severity};
pub use threshold::{evaluate, Threshold};
