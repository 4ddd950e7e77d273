//! `healthmon check`: run every configured probe once and report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::{Config, DiskCheck, Limits, SystemEnv};
use crate::core::health::{write_report, RunReport, Runner, Verdict};
use crate::platform::SysinfoHost;
use crate::ui::{format_run_report, SeverityStyle};

/// The report file could not be written; the health verdict may be unrecorded
pub const EXIT_REPORT_ERROR: i32 = 2;
/// Configuration was rejected before any check ran
pub const EXIT_CONFIG_ERROR: i32 = 3;

/// Run the checks and return the process exit code.
///
/// Errors returned from here are startup (configuration) errors.
pub fn execute(matches: &ArgMatches) -> Result<i32> {
    let config = resolve_config(matches)?;

    let host = Arc::new(SysinfoHost::new());
    let registry = config
        .build_registry(host)
        .context("Invalid monitor configuration")?;

    log::debug!("Running checks: {:?}", registry.names());

    let runner = Runner::with_config(config.runner_config());
    let report = runner.run(&registry);

    let style = SeverityStyle::new(config.color);
    let json = matches.get_flag("json");

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", format_run_report(&report, &style));
    }

    let write_file = !matches.get_flag("no-report");
    let report_written = !write_file || save_report(&report, &config, json);

    Ok(exit_code(report.verdict(), report_written))
}

/// Exit status for a finished run: report I/O failures take precedence over the verdict
pub fn exit_code(verdict: Verdict, report_written: bool) -> i32 {
    if report_written {
        verdict.exit_code()
    } else {
        EXIT_REPORT_ERROR
    }
}

fn save_report(report: &RunReport, config: &Config, quiet: bool) -> bool {
    match write_report(report, &config.report_path) {
        Ok(()) => {
            if !quiet {
                let mark = if config.color {
                    "✓".green().to_string()
                } else {
                    "✓".to_string()
                };
                println!("\n{} Report saved to: {}", mark, config.report_path.display());
            }
            true
        }
        Err(e) => {
            log::error!("{}", e);
            let mark = if config.color {
                "✗".red().to_string()
            } else {
                "✗".to_string()
            };
            eprintln!("\n{} Error generating report: {}", mark, e);
            false
        }
    }
}

/// Merge defaults, config file, environment and command-line flags
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = Config::load(config_path.map(|p| p.as_path()))?;
    config.apply_env(&SystemEnv)?;
    apply_flags(&mut config, matches);
    config.validate()?;
    Ok(config)
}

/// Apply `check` flags on top of `config`
pub fn apply_flags(config: &mut Config, matches: &ArgMatches) {
    if let Some(path) = matches.get_one::<PathBuf>("report") {
        config.report_path = path.clone();
    }

    if let Some(paths) = matches.get_many::<PathBuf>("disk") {
        config.disks = paths.cloned().map(DiskCheck::new).collect();
    }

    let disk_warning = matches.get_one::<f64>("disk-warning").copied();
    let disk_critical = matches.get_one::<f64>("disk-critical").copied();
    for disk in &mut config.disks {
        override_limits(&mut disk.limits, disk_warning, disk_critical);
    }

    if matches.get_flag("no-memory") {
        config.memory = None;
    } else {
        let warning = matches.get_one::<f64>("memory-warning").copied();
        let critical = matches.get_one::<f64>("memory-critical").copied();
        if warning.is_some() || critical.is_some() {
            let limits = config.memory.get_or_insert_with(Limits::default);
            override_limits(limits, warning, critical);
        }
    }

    if matches.get_flag("cpu") && config.cpu.is_none() {
        config.cpu = Some(Limits::default());
    }

    if let Some(names) = matches.get_many::<String>("process") {
        for name in names {
            if !config.processes.contains(name) {
                config.processes.push(name.clone());
            }
        }
    }

    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout_secs = Some(*secs);
    }

    if matches.get_flag("parallel") {
        config.parallel = true;
    }

    if matches.get_flag("no-color") {
        config.color = false;
    }
}

fn override_limits(limits: &mut Limits, warning: Option<f64>, critical: Option<f64>) {
    if let Some(warning) = warning {
        limits.warning = warning;
    }
    if let Some(critical) = critical {
        limits.critical = critical;
    }
}
