//! Threshold checks for gating a test run on a finished report.

use thiserror::Error;

use crate::model::CoverageReport;

/// Bounds a report must satisfy. Defaults demand full coverage and no
/// missing files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckPolicy {
    /// Aggregate ratio must be at least this.
    pub min_ratio: f64,
    /// At most this many manifest files may be missing.
    pub max_missing: usize,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            min_ratio: 1.0,
            max_missing: 0,
        }
    }
}

/// One violated bound, carrying the measured value and the limit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckFailure {
    #[error("aggregate ratio {ratio:.4} is below the minimum {min_ratio:.4}")]
    RatioBelowMinimum { ratio: f64, min_ratio: f64 },
    #[error("{missing} missing files exceed the maximum of {max_missing}")]
    TooManyMissing { missing: usize, max_missing: usize },
}

/// Evaluate the policy against a report. An empty result means the report
/// passes; bounds are inclusive.
#[must_use]
pub fn run_checks(report: &CoverageReport, policy: &CheckPolicy) -> Vec<CheckFailure> {
    let mut failures = Vec::new();

    if report.ratio < policy.min_ratio {
        failures.push(CheckFailure::RatioBelowMinimum {
            ratio: report.ratio,
            min_ratio: policy.min_ratio,
        });
    }

    if report.missing.len() > policy.max_missing {
        failures.push(CheckFailure::TooManyMissing {
            missing: report.missing.len(),
            max_missing: policy.max_missing,
        });
    }

    failures
}
