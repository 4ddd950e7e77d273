use super::severity::{CheckResult, Observation};
use crate::error::ProbeError;

/// A single health check.
///
/// Implementors only write `check`, which reports failure through `ProbeError`.
/// `execute` is the boundary the runner calls: it always yields a `CheckResult`,
/// turning any error into an UNKNOWN result that carries the error message.
pub trait Probe: Send + Sync {
    /// Fixed name the result is reported under
    fn name(&self) -> &str;

    /// Inspect the system once
    fn check(&self) -> Result<Observation, ProbeError>;

    fn execute(&self) -> CheckResult {
        match self.check() {
            Ok(observation) => CheckResult::from_observation(self.name(), observation),
            Err(e) => {
                log::warn!("Probe '{}' could not run: {}", self.name(), e);
                CheckResult::unknown(self.name(), e.to_string())
            }
        }
    }
}
