use serde::Serialize;

use crate::error::InvalidTolerance;

/// What a tolerance violation does to the final outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TolerancePolicy {
    /// Violations are reported but the comparison still passes.
    #[default]
    Warn,
    /// Any violation fails the comparison.
    Strict,
}

/// Settings for a single comparison run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    tolerance: f64,
    pub policy: TolerancePolicy,
}

impl CompareOptions {
    /// `tolerance` is an absolute bound and must be finite and non-negative.
    pub fn new(tolerance: f64) -> Result<Self, InvalidTolerance> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(InvalidTolerance(tolerance));
        }
        Ok(CompareOptions {
            tolerance,
            policy: TolerancePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: TolerancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
