use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use curve_tolerance::specs::{get_specs_for, SpecSource, DEFAULT_CONFIG_FILE, DEFAULT_MACHINE};

/// Print the build specs configured for a machine, one per line
#[derive(Parser, Debug)]
#[command(name = "get_specs")]
#[command(version, about, long_about = None)]
struct Args {
    /// Machine name to look up
    #[arg(long, default_value = DEFAULT_MACHINE)]
    machine: String,

    /// YAML config mapping machine names to spec lists
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, conflicts_with = "builtin")]
    config: PathBuf,

    /// Use the compiled-in spec table instead of a config file
    #[arg(long)]
    builtin: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let source = if args.builtin {
        SpecSource::Builtin
    } else {
        SpecSource::Yaml(args.config)
    };

    let specs = get_specs_for(&args.machine, &source)
        .with_context(|| format!("resolving specs for {}", args.machine))?;
    for spec in specs {
        println!("{spec}");
    }
    Ok(())
}
