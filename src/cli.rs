//! Command line for the curve comparator.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::compare::{compare_with, CompareOptions, TolerancePolicy};
use crate::data::loader::{ensure_file, load_file};
use crate::report::Report;

/// Compare a test curve results file against a baseline within a tolerance
#[derive(Parser, Debug)]
#[command(name = "curve-tolerance")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to baseline curve results file
    #[arg(long)]
    pub baseline: PathBuf,

    /// Path to test curve results file
    #[arg(long)]
    pub test: PathBuf,

    /// Allowed absolute tolerance for individual values
    #[arg(long, value_parser = parse_tolerance)]
    pub tolerance: f64,

    /// Whether out-of-tolerance values fail the run
    #[arg(long, value_enum, default_value_t = TolerancePolicy::Warn, env = "CURVE_TOLERANCE_POLICY")]
    pub policy: TolerancePolicy,

    /// Also write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    CompareOptions::new(value)
        .map(|opts| opts.tolerance())
        .map_err(|e| e.to_string())
}

/// Run the comparison, printing to stdout. Returns whether the test passed.
pub fn run(cli: &Cli) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

/// Run the comparison, printing to `out`. Returns whether the test passed.
pub fn run_with<W: Write>(cli: &Cli, out: &mut W) -> Result<bool> {
    for path in [&cli.baseline, &cli.test] {
        if let Err(e) = ensure_file(path) {
            writeln!(out, "ERROR: {e}")?;
            return Ok(false);
        }
    }

    let options = CompareOptions::new(cli.tolerance)?.with_policy(cli.policy);
    let baseline = load_file(&cli.baseline).context("loading baseline")?;
    let test = load_file(&cli.test).context("loading test")?;

    let mut write_err = None;
    let outcome = compare_with(&baseline, &test, &options, |diag| {
        if write_err.is_none() {
            if let Err(e) = writeln!(out, "ERROR: {diag}") {
                write_err = Some(e);
            }
        }
    });
    if let Some(e) = write_err {
        return Err(e).context("writing diagnostics");
    }

    if options.policy == TolerancePolicy::Strict && outcome.tolerance_violations() > 0 {
        writeln!(out, "       Given tolerance: {}", options.tolerance())?;
    }
    if outcome.passed() {
        writeln!(out, "Success: Test file passed")?;
    }

    log::info!(
        "{}: {} diagnostics ({} out of tolerance)",
        if outcome.passed() { "passed" } else { "failed" },
        outcome.diagnostics().len(),
        outcome.tolerance_violations()
    );

    if let Some(path) = &cli.report {
        Report::new(&outcome, &options).write(path)?;
    }

    Ok(outcome.passed())
}
