//! Built-in probes.
//!
//! Each probe reads the host through an injected capability so tests can
//! substitute deterministic fakes.

mod cpu;
mod disk;
mod memory;
mod process;

pub use cpu::CpuProbe;
pub use disk::DiskProbe;
pub use memory::MemoryProbe;
pub use process::ProcessProbe;

use humansize::{format_size, BINARY};

use super::severity::Severity;
use super::threshold::Threshold;

/// Detail line shared by the threshold-based probes, e.g.
/// `/ at 82.0% used (8.2 GiB of 10 GiB, warning threshold: 75.0%)`
fn usage_detail(
    subject: &str,
    percent: f64,
    used_bytes: Option<(u64, u64)>,
    threshold: &Threshold,
    severity: Severity,
) -> String {
    let mut detail = format!("{} at {:.1}% used", subject, percent);

    let sizes = used_bytes.map(|(used, total)| {
        format!("{} of {}", format_size(used, BINARY), format_size(total, BINARY))
    });
    let cutoff = threshold.cutoff_for(severity).map(|cutoff| {
        format!(
            "{} threshold: {:.1}%",
            severity.as_str().to_lowercase(),
            cutoff
        )
    });

    let extras: Vec<String> = sizes.into_iter().chain(cutoff).collect();
    if !extras.is_empty() {
        detail.push_str(&format!(" ({})", extras.join(", ")));
    }

    detail
}
