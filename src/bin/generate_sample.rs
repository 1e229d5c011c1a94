use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use curve_tolerance::data::sample::{sample_pair, SAMPLE_STEPS};
use serde_json::Value as JsonValue;

/// Write a synthetic baseline/test pair of curve results files
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to write baseline.json and test.json into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Maximum absolute perturbation applied to the test values
    #[arg(long, default_value_t = 1e-6)]
    noise: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn write_json(path: &Path, value: &JsonValue) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let (baseline, test) = sample_pair(args.seed, args.noise);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    write_json(&args.out_dir.join("baseline.json"), &baseline)?;
    write_json(&args.out_dir.join("test.json"), &test)?;

    println!(
        "Wrote baseline.json and test.json ({SAMPLE_STEPS} steps, noise {}) to {}",
        args.noise,
        args.out_dir.display()
    );
    Ok(())
}
