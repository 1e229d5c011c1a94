//! Machine-readable summary of a comparison, written next to the console output.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compare::{CompareOptions, Outcome, TolerancePolicy};
use crate::error::Diagnostic;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub passed: bool,
    pub tolerance: f64,
    pub policy: TolerancePolicy,
    pub tolerance_violations: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new(outcome: &Outcome, options: &CompareOptions) -> Self {
        Report {
            passed: outcome.passed(),
            tolerance: options.tolerance(),
            policy: options.policy,
            tolerance_violations: outcome.tolerance_violations(),
            diagnostics: outcome.diagnostics(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing report")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("wrote report to {}", path.display());
        Ok(())
    }
}
