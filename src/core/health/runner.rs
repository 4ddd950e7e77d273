//! Executes registered probes and collects their results.
//!
//! A probe can never abort a run: errors become UNKNOWN inside `Probe::execute`,
//! and panics are caught here and become UNKNOWN as well.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use futures_util::future::join_all;

use super::probe::Probe;
use super::registry::CheckRegistry;
use super::report::RunReport;
use super::severity::CheckResult;
use crate::error::ProbeError;

/// How probes are scheduled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Per-probe deadline; an expired probe is reported UNKNOWN "timed out"
    pub timeout: Option<Duration>,
    /// Run all probes at once instead of one after another
    pub concurrent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every registered probe once, in registration order.
    pub fn run(&self, registry: &CheckRegistry) -> RunReport {
        let generated_at = Local::now();
        let started = Instant::now();

        let results = if self.needs_runtime() {
            self.run_on_runtime(registry)
        } else {
            self.run_sequential(registry)
        };

        log::info!(
            "Ran {} probe(s) in {:?}",
            results.len(),
            started.elapsed()
        );

        RunReport::new(generated_at, results)
    }

    /// Async variant for callers that already own a tokio runtime with time enabled.
    pub async fn run_async(&self, registry: &CheckRegistry) -> Vec<CheckResult> {
        let timeout = self.config.timeout;
        let tasks = registry
            .list()
            .iter()
            .map(|probe| run_blocking(Arc::clone(probe), timeout));

        if self.config.concurrent {
            // join_all yields outputs in input order
            join_all(tasks).await
        } else {
            let mut results = Vec::with_capacity(registry.len());
            for task in tasks {
                results.push(task.await);
            }
            results
        }
    }

    fn needs_runtime(&self) -> bool {
        self.config.timeout.is_some() || self.config.concurrent
    }

    fn run_sequential(&self, registry: &CheckRegistry) -> Vec<CheckResult> {
        registry
            .list()
            .iter()
            .map(|probe| run_guarded(probe.as_ref()))
            .collect()
    }

    fn run_on_runtime(&self, registry: &CheckRegistry) -> Vec<CheckResult> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.run_on_own_runtime(registry);
        }

        // A runtime cannot be started from a thread that already drives one
        log::debug!("Caller is inside a tokio runtime, running probes on a helper thread");
        std::thread::scope(|scope| {
            match scope.spawn(|| self.run_on_own_runtime(registry)).join() {
                Ok(results) => results,
                Err(_) => {
                    log::warn!("Probe runtime thread failed, running probes sequentially");
                    self.run_sequential(registry)
                }
            }
        })
    }

    fn run_on_own_runtime(&self, registry: &CheckRegistry) -> Vec<CheckResult> {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("probe-worker")
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::warn!(
                    "Could not start probe runtime ({}), running probes sequentially",
                    e
                );
                return self.run_sequential(registry);
            }
        };

        let results = runtime.block_on(self.run_async(registry));

        // A timed-out probe may still be blocking a worker thread; don't wait for it
        runtime.shutdown_background();

        results
    }
}

/// Execute a probe in the current thread, converting a panic into UNKNOWN
fn run_guarded(probe: &dyn Probe) -> CheckResult {
    log::debug!("Running probe '{}'", probe.name());

    match panic::catch_unwind(AssertUnwindSafe(|| probe.execute())) {
        Ok(result) => {
            log::debug!("Probe '{}' finished: {}", probe.name(), result.severity());
            result
        }
        Err(payload) => panicked(probe.name(), payload.as_ref()),
    }
}

async fn run_blocking(probe: Arc<dyn Probe>, timeout: Option<Duration>) -> CheckResult {
    let name = probe.name().to_string();
    log::debug!("Running probe '{}'", name);

    let handle = tokio::task::spawn_blocking(move || probe.execute());

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                log::warn!("Probe '{}' timed out after {:?}", name, limit);
                return CheckResult::unknown(name, ProbeError::TimedOut.to_string());
            }
        },
        None => handle.await,
    };

    match joined {
        Ok(result) => {
            log::debug!("Probe '{}' finished: {}", name, result.severity());
            result
        }
        Err(e) if e.is_panic() => panicked(&name, e.into_panic().as_ref()),
        Err(e) => {
            log::warn!("Probe '{}' was cancelled: {}", name, e);
            CheckResult::unknown(name, ProbeError::query(e.to_string()).to_string())
        }
    }
}

fn panicked(name: &str, payload: &(dyn Any + Send)) -> CheckResult {
    let message = panic_message(payload);
    log::warn!("Probe '{}' panicked: {}", name, message);
    CheckResult::unknown(name, ProbeError::panicked(message).to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
