//! Maps a raw metric value onto a severity.
//!
//! Cutoffs are inclusive: a value equal to a cutoff triggers that tier.

use super::severity::Severity;
use crate::error::{HealthError, Result};

/// Evaluate `value` against warning and critical cutoffs.
pub fn evaluate(value: f64, warning_at: f64, critical_at: f64) -> Severity {
    if value >= critical_at {
        Severity::Critical
    } else if value >= warning_at {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// A validated pair of cutoffs. `warning_at <= critical_at` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    warning_at: f64,
    critical_at: f64,
}

impl Threshold {
    pub fn new(warning_at: f64, critical_at: f64) -> Result<Self> {
        if !warning_at.is_finite() || !critical_at.is_finite() {
            return Err(HealthError::config(format!(
                "threshold cutoffs must be finite numbers (warning: {}, critical: {})",
                warning_at, critical_at
            )));
        }
        if warning_at > critical_at {
            return Err(HealthError::InvalidThreshold {
                warning_at,
                critical_at,
            });
        }
        Ok(Self {
            warning_at,
            critical_at,
        })
    }

    pub fn warning_at(&self) -> f64 {
        self.warning_at
    }

    pub fn critical_at(&self) -> f64 {
        self.critical_at
    }

    pub fn evaluate(&self, value: f64) -> Severity {
        evaluate(value, self.warning_at, self.critical_at)
    }

    /// The cutoff that `severity` was triggered by, if any
    pub fn cutoff_for(&self, severity: Severity) -> Option<f64> {
        match severity {
            Severity::Critical => Some(self.critical_at),
            Severity::Warning => Some(self.warning_at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoffs_are_inclusive() {
        assert_eq!(evaluate(90.0, 75.0, 90.0), Severity::Critical);
        assert_eq!(evaluate(75.0, 75.0, 90.0), Severity::Warning);
        assert_eq!(evaluate(74.999, 75.0, 90.0), Severity::Ok);
        assert_eq!(evaluate(89.999, 75.0, 90.0), Severity::Warning);
    }

    #[test]
    fn test_equal_cutoffs_skip_warning_tier() {
        assert_eq!(evaluate(80.0, 80.0, 80.0), Severity::Critical);
        assert_eq!(evaluate(79.0, 80.0, 80.0), Severity::Ok);
    }

    #[test]
    fn test_monotonic_in_value() {
        let cutoffs = [(0.0, 0.0), (10.0, 20.0), (75.0, 90.0), (50.0, 100.0)];
        for (warning, critical) in cutoffs {
            let mut previous = Severity::Ok;
            for step in 0..=1100 {
                let value = step as f64 / 10.0;
                let current = evaluate(value, warning, critical);
                assert!(
                    current >= previous,
                    "severity dropped at {} for ({}, {})",
                    value,
                    warning,
                    critical
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_threshold_rejects_inverted_cutoffs() {
        let err = Threshold::new(90.0, 75.0).unwrap_err();
        assert!(matches!(err, HealthError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_threshold_rejects_nan() {
        assert!(Threshold::new(f64::NAN, 90.0).is_err());
        assert!(Threshold::new(75.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_cutoff_for() {
        let threshold = Threshold::new(75.0, 90.0).unwrap();
        assert_eq!(threshold.cutoff_for(Severity::Warning), Some(75.0));
        assert_eq!(threshold.cutoff_for(Severity::Critical), Some(90.0));
        assert_eq!(threshold.cutoff_for(Severity::Ok), None);
    }
}
