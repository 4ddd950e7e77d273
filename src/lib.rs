// healthmon library - public API

// Re-export error types
pub mod error;
pub use error::{HealthError, ProbeError, Result};

// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::health::{CheckRegistry, CheckResult, RunReport, Runner, Severity, Verdict};

/// Initialize logging. Defaults to warnings so stdout stays the report;
/// `verbose` raises it to debug. `RUST_LOG` directives still apply.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
