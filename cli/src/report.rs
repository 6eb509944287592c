use std::{fs, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Args;
use suite::{
    allure::{SuiteParser, TestSuite},
    FallbackScope, MalformedPolicy, ParseOptions,
};

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    #[arg(
        required = true,
        help = "Allure XML reports to parse. Later reports are merged into earlier ones."
    )]
    pub files: Vec<PathBuf>,
    #[arg(
        long,
        value_enum,
        env = "ALLURE_SUITE_ON_MALFORMED",
        default_value_t = MalformedPolicy::default(),
        help = "Abort the parse or skip a test case that is missing its name or title."
    )]
    pub on_malformed_test_case: MalformedPolicy,
    #[arg(
        long,
        value_enum,
        env = "ALLURE_SUITE_FALLBACK_SCOPE",
        default_value_t = FallbackScope::default(),
        help = "Where to look for the suite name and title when no label supplies them."
    )]
    pub fallback_scope: FallbackScope,
}

impl ReportArgs {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            on_malformed_test_case: self.on_malformed_test_case,
            fallback_scope: self.fallback_scope,
        }
    }
}

/// Parses every report in `files` and merges them in the order given.
pub fn load_test_suite(report_args: &ReportArgs) -> anyhow::Result<TestSuite> {
    let parser = SuiteParser::new().with_options(report_args.parse_options());

    let mut merged: Option<TestSuite> = None;
    for path in &report_args.files {
        let file = fs::File::open(path)
            .with_context(|| format!("failed to open report {}", path.display()))?;
        let test_suite = parser
            .parse(BufReader::new(file))
            .with_context(|| format!("failed to parse report {}", path.display()))?;
        tracing::info!(
            "Parsed {} test cases from {}",
            test_suite.test_cases.len(),
            path.display()
        );

        merged = Some(match merged {
            Some(mut suite) => {
                suite.merge(test_suite, parser.tms_link());
                suite
            }
            None => test_suite,
        });
    }

    merged.ok_or_else(|| anyhow::anyhow!("No report files provided."))
}
