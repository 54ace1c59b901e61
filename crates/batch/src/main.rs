use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use ordermig_batch::{BatchConfig, FailureMode, RunSummary};

/// Convert legacy order records into the normalized order schema
#[derive(Parser)]
#[command(name = "ordermig-batch")]
#[command(version, long_about = None)]
struct Cli {
    /// JSON document holding an array of legacy orders
    #[arg(short, long, default_value = "data.json")]
    input: PathBuf,

    /// Directory for data-transformed.json (defaults to $CHALLENGE_OUTPUT_DIR, then the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Convert every valid order instead of stopping at the first invalid one
    #[arg(long)]
    keep_going: bool,
}

fn try_main(cli: Cli) -> anyhow::Result<RunSummary> {
    let mode = if cli.keep_going {
        FailureMode::KeepGoing
    } else {
        FailureMode::FailFast
    };
    let config = BatchConfig::new(cli.input, cli.output_dir, mode);
    tracing::info!(output = %config.output_path().display(), "output location resolved");

    ordermig_batch::run(&config).context("error encountered while converting orders")
}

fn main() -> ExitCode {
    ordermig_observability::init();

    match try_main(Cli::parse()) {
        Ok(summary) if summary.failures.is_empty() => ExitCode::SUCCESS,
        Ok(summary) => {
            for failure in &summary.failures {
                tracing::error!(index = failure.index, error = %failure.error, "order not converted");
            }
            ExitCode::from(2)
        }
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!(error = %message, "batch conversion failed");
            ExitCode::FAILURE
        }
    }
}
