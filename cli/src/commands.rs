use std::io::Write;

use clap::Args;
use constants::EXIT_SUCCESS;
use suite::allure::html::{get_actual_results, get_test_cases_summary};

use crate::report::{load_test_suite, ReportArgs};

#[derive(Args, Clone, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub report_args: ReportArgs,
    #[arg(
        long,
        help = "Actual results entered by hand, appended after the ones found in the reports."
    )]
    pub actual_results: Option<String>,
}

pub fn run_parse<W: Write>(report_args: ReportArgs, mut out: W) -> anyhow::Result<i32> {
    let test_suite = load_test_suite(&report_args)?;
    serde_json::to_writer_pretty(&mut out, &test_suite)?;
    writeln!(out)?;
    Ok(EXIT_SUCCESS)
}

pub fn run_status<W: Write>(report_args: ReportArgs, mut out: W) -> anyhow::Result<i32> {
    let test_suite = load_test_suite(&report_args)?;
    writeln!(out, "{}", test_suite.status())?;
    Ok(EXIT_SUCCESS)
}

pub fn run_summary<W: Write>(summary_args: SummaryArgs, mut out: W) -> anyhow::Result<i32> {
    let SummaryArgs {
        report_args,
        actual_results,
    } = summary_args;
    let test_suite = load_test_suite(&report_args)?;

    writeln!(out, "{}", get_test_cases_summary(&test_suite))?;
    if let Some(actual_results) = actual_results {
        writeln!(out, "{}", get_actual_results(&test_suite, &actual_results))?;
    }
    Ok(EXIT_SUCCESS)
}

pub fn run_steps<W: Write>(report_args: ReportArgs, mut out: W) -> anyhow::Result<i32> {
    let test_suite = load_test_suite(&report_args)?;
    serde_json::to_writer_pretty(&mut out, &test_suite.steps_to_update())?;
    writeln!(out)?;
    Ok(EXIT_SUCCESS)
}
