use std::sync::Arc;
use std::time::Duration;

use healthmon::commands::check::{exit_code, EXIT_REPORT_ERROR};
use healthmon::core::config::{Config, Limits};
use healthmon::core::health::{
    CheckRegistry, DiskProbe, MemoryProbe, Observation, Probe, ProcessProbe, Runner, RunnerConfig,
    Severity, Verdict,
};
use healthmon::ProbeError;

use super::support::FakeHost;

fn scenario_config(processes: &[&str]) -> Config {
    Config {
        processes: processes.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_degraded_host_fails() {
    let host = FakeHost {
        disk_percent: Ok(82),
        memory_percent: Some(40),
        ..FakeHost::healthy()
    };

    let registry = scenario_config(&["nginx"])
        .build_registry(Arc::new(host))
        .unwrap();
    let report = Runner::new().run(&registry);

    let summary: Vec<(&str, Severity)> = report
        .results()
        .iter()
        .map(|r| (r.name(), r.severity()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("disk", Severity::Warning),
            ("memory", Severity::Ok),
            ("nginx", Severity::Critical),
        ]
    );
    assert_eq!(report.results()[2].detail(), "not running");
    assert_eq!(report.verdict(), Verdict::Fail);
    assert_eq!(exit_code(report.verdict(), true), 1);
}

#[test]
fn test_healthy_host_passes() {
    let host = FakeHost::healthy().with_process("nginx", 2);

    let registry = scenario_config(&["nginx"])
        .build_registry(Arc::new(host))
        .unwrap();
    let report = Runner::new().run(&registry);

    assert!(report.results().iter().all(|r| r.severity() == Severity::Ok));
    assert_eq!(report.results()[2].detail(), "running (2 processes)");
    assert_eq!(report.verdict(), Verdict::Pass);
    assert_eq!(exit_code(report.verdict(), true), 0);
}

#[test]
fn test_unreadable_disk_is_unknown_and_fails() {
    let host = FakeHost {
        disk_percent: Err("Permission denied (os error 13)".to_string()),
        ..FakeHost::healthy()
    };

    let registry = Config::default().build_registry(Arc::new(host)).unwrap();
    let report = Runner::new().run(&registry);

    assert_eq!(report.total(), 2);
    assert_eq!(report.results()[0].severity(), Severity::Unknown);
    assert!(report.results()[0].detail().contains("Permission denied"));
    assert_eq!(report.results()[1].severity(), Severity::Ok);
    assert_eq!(report.verdict(), Verdict::Fail);
}

#[test]
fn test_missing_memory_accounting_does_not_abort() {
    let host = FakeHost {
        memory_percent: None,
        ..FakeHost::healthy()
    };

    let registry = Config::default().build_registry(Arc::new(host)).unwrap();
    let report = Runner::new().run(&registry);

    assert_eq!(report.total(), 2);
    assert_eq!(report.results()[1].name(), "memory");
    assert_eq!(report.results()[1].severity(), Severity::Unknown);
}

#[test]
fn test_report_io_failure_overrides_exit_code_only() {
    let registry = Config::default()
        .build_registry(Arc::new(FakeHost::healthy()))
        .unwrap();
    let report = Runner::new().run(&registry);

    assert_eq!(report.verdict(), Verdict::Pass);
    assert_eq!(exit_code(report.verdict(), false), EXIT_REPORT_ERROR);
}

#[test]
fn test_inverted_threshold_rejected_before_running() {
    let config = Config {
        memory: Some(Limits::new(95.0, 90.0)),
        ..Default::default()
    };

    let err = config
        .build_registry(Arc::new(FakeHost::healthy()))
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_duplicate_process_names_rejected() {
    let config = scenario_config(&["nginx", "nginx"]);
    let err = config
        .build_registry(Arc::new(FakeHost::healthy()))
        .unwrap_err();
    assert!(err.to_string().contains("nginx"));
}

#[test]
fn test_multiple_disks_get_path_names() {
    let mut config = Config::default();
    config.disks = vec![
        healthmon::core::config::DiskCheck::new("/"),
        healthmon::core::config::DiskCheck::new("/var"),
    ];

    let registry = config.build_registry(Arc::new(FakeHost::healthy())).unwrap();
    assert_eq!(registry.names(), vec!["disk:/", "disk:/var", "memory"]);
}

struct Failing(usize);

impl Probe for Failing {
    fn name(&self) -> &str {
        ["f0", "f1", "f2", "f3", "f4", "f5"][self.0]
    }

    fn check(&self) -> Result<Observation, ProbeError> {
        if self.0 % 2 == 0 {
            panic!("probe {} broke", self.0);
        }
        Err(ProbeError::query("boom"))
    }
}

#[test]
fn test_every_probe_yields_one_result() {
    let host = Arc::new(FakeHost::healthy().with_process("sshd", 1));

    for concurrent in [false, true] {
        let mut registry = CheckRegistry::new();
        registry
            .register(DiskProbe::new("/", 75.0, 90.0, host.clone()).unwrap())
            .unwrap();
        for i in 0..4 {
            registry.register(Failing(i)).unwrap();
        }
        registry
            .register(MemoryProbe::new(75.0, 90.0, host.clone()).unwrap())
            .unwrap();
        registry
            .register(ProcessProbe::new("sshd", host.clone()).unwrap())
            .unwrap();

        let runner = Runner::with_config(RunnerConfig {
            timeout: Some(Duration::from_secs(10)),
            concurrent,
        });
        let report = runner.run(&registry);

        assert_eq!(report.total(), 7);
        assert_eq!(report.count(Severity::Unknown), 4);
        assert_eq!(report.passed(), 3);
        assert_eq!(
            registry.names(),
            report.results().iter().map(|r| r.name()).collect::<Vec<_>>()
        );
    }
}
