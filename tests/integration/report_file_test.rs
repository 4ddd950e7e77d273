use std::fs;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use healthmon::core::config::Config;
use healthmon::core::health::{render, write_report, CheckResult, RunReport, Runner, Severity};
use healthmon::HealthError;
use tempfile::TempDir;

use super::support::FakeHost;

fn fixed_report(severity: Severity) -> RunReport {
    let at = Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    RunReport::new(
        at,
        vec![
            CheckResult::new("disk", severity, "/ at 50.0% used", None),
            CheckResult::new("memory", Severity::Ok, "memory at 20.0% used", None),
        ],
    )
}

#[test]
fn test_write_report_matches_render() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.txt");
    let report = fixed_report(Severity::Ok);

    write_report(&report, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, render(&report));
    assert!(content.contains("Generated: 2026-10-19 12:00:00"));
    assert!(content.ends_with("OVERALL STATUS: ALL CHECKS PASSED\n"));
}

#[test]
fn test_write_report_overwrites_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.txt");
    fs::write(&path, "stale content from an older run\n".repeat(100)).unwrap();

    write_report(&fixed_report(Severity::Critical), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("stale content"));
    assert!(content.contains("OVERALL STATUS: SOME CHECKS FAILED"));
    assert!(content.contains("Checks passed: 1/2"));
}

#[test]
fn test_write_report_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("report.txt");
    let report = fixed_report(Severity::Ok);

    let err = write_report(&report, &path).unwrap_err();
    assert!(matches!(err, HealthError::Report { .. }));
    assert!(!err.is_configuration());
    // The verdict is about the host, not about where the report went
    assert!(report.verdict().is_pass());
}

#[test]
fn test_end_to_end_report_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        report_path: temp_dir.path().join("system_monitor_report.txt"),
        processes: vec!["nginx".to_string()],
        ..Default::default()
    };

    let registry = config.build_registry(Arc::new(FakeHost::healthy())).unwrap();
    let report = Runner::with_config(config.runner_config()).run(&registry);
    write_report(&report, &config.report_path).unwrap();

    let content = fs::read_to_string(&config.report_path).unwrap();
    let result_lines: Vec<&str> = content
        .lines()
        .skip_while(|l| *l != "RESULTS:")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();

    assert_eq!(result_lines.len(), 3);
    assert!(result_lines[0].trim_start().starts_with("disk"));
    assert!(result_lines[1].trim_start().starts_with("memory"));
    assert!(result_lines[2].contains("CRITICAL"));
    assert!(result_lines[2].ends_with("not running"));
}
