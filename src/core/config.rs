use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::core::health::{
    CheckRegistry, CpuProbe, DiskProbe, HostCapabilities, MemoryProbe, ProcessProbe, RunnerConfig,
    Threshold,
};
use crate::error::{HealthError, Result};

pub const ENV_REPORT_PATH: &str = "HEALTHMON_REPORT_PATH";
pub const ENV_PROCESSES: &str = "HEALTHMON_PROCESSES";
pub const ENV_TIMEOUT_SECS: &str = "HEALTHMON_TIMEOUT_SECS";
pub const ENV_PARALLEL: &str = "HEALTHMON_PARALLEL";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Warning and critical cutoffs, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    pub warning: f64,
    pub critical: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            warning: 75.0,
            critical: 90.0,
        }
    }
}

impl Limits {
    pub fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    fn validate(&self, what: &str) -> Result<Threshold> {
        let threshold = Threshold::new(self.warning, self.critical)?;
        if !(0.0..=100.0).contains(&self.warning) || !(0.0..=100.0).contains(&self.critical) {
            return Err(HealthError::config(format!(
                "{} thresholds must be percentages between 0 and 100 (warning: {}, critical: {})",
                what, self.warning, self.critical
            )));
        }
        Ok(threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiskCheck {
    pub path: PathBuf,
    /// Overrides the generated check name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub limits: Limits,
}

impl DiskCheck {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            limits: Limits::default(),
        }
    }
}

/// Monitor configuration.
///
/// Layers, lowest precedence first: defaults, JSON config file, environment, CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub report_path: PathBuf,
    pub disks: Vec<DiskCheck>,
    /// `None` disables the memory check
    pub memory: Option<Limits>,
    /// `None` disables the CPU check
    pub cpu: Option<Limits>,
    pub processes: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub parallel: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            disks: vec![DiskCheck::new("/")],
            memory: Some(Limits::default()),
            cpu: None,
            processes: Vec::new(),
            timeout_secs: None,
            parallel: false,
            color: true,
        }
    }
}

/// Where the report goes unless configured otherwise
pub fn default_report_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/system_monitor_report.txt")
    }

    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("system_monitor_report.txt")
    }
}

/// Source of environment variables, swappable in tests
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Config {
    /// Load from an explicit file, or from the default location when `path` is `None`.
    ///
    /// A missing default file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::get_config_path() {
                Some(default_path) if default_path.exists() => Self::load_from(&default_path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                HealthError::config(format!("config file not found: {}", path.display()))
            }
            _ => HealthError::config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            )),
        })?;

        log::debug!("Loading config from {}", path.display());

        // An empty file is treated like a missing one
        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_json::from_str(&data).map_err(|e| {
            HealthError::config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    /// `<config_dir>/healthmon/config.json`
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("healthmon").join("config.json"))
    }

    /// Apply `HEALTHMON_*` and `NO_COLOR` overrides
    pub fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        if let Some(path) = env.var(ENV_REPORT_PATH).filter(|v| !v.trim().is_empty()) {
            self.report_path = PathBuf::from(path);
        }

        if let Some(list) = env.var(ENV_PROCESSES) {
            self.processes = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(raw) = env.var(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                HealthError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            self.timeout_secs = Some(secs);
        }

        if let Some(raw) = env.var(ENV_PARALLEL) {
            self.parallel = parse_flag(ENV_PARALLEL, &raw)?;
        }

        // https://no-color.org: any value disables color
        if env.var(ENV_NO_COLOR).is_some() {
            self.color = false;
        }

        Ok(())
    }

    /// Reject inverted or out-of-range thresholds and empty names before anything runs
    pub fn validate(&self) -> Result<()> {
        for disk in &self.disks {
            disk.limits
                .validate(&format!("disk {}", disk.path.display()))?;
        }
        if let Some(limits) = &self.memory {
            limits.validate("memory")?;
        }
        if let Some(limits) = &self.cpu {
            limits.validate("cpu")?;
        }
        if self.processes.iter().any(|p| p.trim().is_empty()) {
            return Err(HealthError::config("process names cannot be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(HealthError::config("timeout must be at least one second"));
        }
        Ok(())
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            concurrent: self.parallel,
        }
    }

    /// Build the probe registry: disks, then memory, CPU and processes.
    pub fn build_registry<H>(&self, host: Arc<H>) -> Result<CheckRegistry>
    where
        H: HostCapabilities + 'static,
    {
        self.validate()?;

        let mut registry = CheckRegistry::new();

        for disk in &self.disks {
            let name = match &disk.name {
                Some(name) => name.clone(),
                None if self.disks.len() == 1 => "disk".to_string(),
                None => format!("disk:{}", disk.path.display()),
            };
            let probe = DiskProbe::new(
                disk.path.clone(),
                disk.limits.warning,
                disk.limits.critical,
                host.clone(),
            )?
            .with_name(name);
            registry.register(probe)?;
        }

        if let Some(limits) = &self.memory {
            registry.register(MemoryProbe::new(
                limits.warning,
                limits.critical,
                host.clone(),
            )?)?;
        }

        if let Some(limits) = &self.cpu {
            registry.register(CpuProbe::new(limits.warning, limits.critical, host.clone())?)?;
        }

        for process in &self.processes {
            registry.register(ProcessProbe::new(process.clone(), host.clone())?)?;
        }

        Ok(registry)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(HealthError::config(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}
