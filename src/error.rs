use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for the healthmon library
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid threshold: warning at {warning_at} is above critical at {critical_at}")]
    InvalidThreshold { warning_at: f64, critical_at: f64 },

    #[error("Duplicate probe name: {0}")]
    DuplicateProbe(String),

    #[error("Failed to write report to {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for healthmon
pub type Result<T> = std::result::Result<T, HealthError>;

impl HealthError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HealthError::Config(msg.into())
    }

    pub fn duplicate_probe<S: Into<String>>(name: S) -> Self {
        HealthError::DuplicateProbe(name.into())
    }

    pub fn report(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HealthError::Report {
            path: path.into(),
            source,
        }
    }

    /// True for errors that must stop the monitor before any check runs
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HealthError::Config(_)
                | HealthError::InvalidThreshold { .. }
                | HealthError::DuplicateProbe(_)
        )
    }
}

/// Failure of a single probe or of the capability it depends on.
///
/// Never escapes a run: the probe boundary turns it into an UNKNOWN result.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("timed out")]
    TimedOut,

    #[error("probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        ProbeError::Unavailable(msg.into())
    }

    pub fn query<S: Into<String>>(msg: S) -> Self {
        ProbeError::Query(msg.into())
    }

    pub fn panicked<S: Into<String>>(msg: S) -> Self {
        ProbeError::Panicked(msg.into())
    }
}
