use std::io;

use clap::{Parser, Subcommand};
use constants::{EXIT_FAILURE, LOG_FILTER_ENV};
use suite_cli::{
    commands::{run_parse, run_status, run_steps, run_summary, SummaryArgs},
    report::ReportArgs,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    version = std::env!("CARGO_PKG_VERSION"),
    name = "allure-suite",
    about = "Turn Allure XML reports into test suites for a test-management backend",
)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse and merge reports, then print the test suite as JSON
    Parse(ReportArgs),
    /// Print the overall status of the merged test suite
    Status(ReportArgs),
    /// Print the HTML summary of the tested actions
    Summary(SummaryArgs),
    /// Print the flattened steps to update as JSON
    Steps(ReportArgs),
}

fn main() {
    setup_logger();
    let cli = Cli::parse();
    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            tracing::error!("Error: {:?}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let stdout = io::stdout().lock();
    match cli.command {
        Commands::Parse(report_args) => run_parse(report_args, stdout),
        Commands::Status(report_args) => run_status(report_args, stdout),
        Commands::Summary(summary_args) => run_summary(summary_args, stdout),
        Commands::Steps(report_args) => run_steps(report_args, stdout),
    }
}

fn setup_logger() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
