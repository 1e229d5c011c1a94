use std::process::ExitCode;

use clap::Parser;
use curve_tolerance::cli::{self, Cli};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match cli::run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("comparison aborted: {e:#}");
            println!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}
