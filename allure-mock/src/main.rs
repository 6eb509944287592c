use std::path::PathBuf;

use allure_mock::AllureMock;
use anyhow::Result;
use clap::Parser;

#[derive(Debug, Parser)]
pub struct Cli {
    /// Directory to output the Allure XML report
    #[arg(required = true)]
    pub directory: PathBuf,

    /// File name of the generated report
    #[arg(long, default_value = "allure-testsuite.xml")]
    pub file_name: String,

    #[command(flatten)]
    pub options: allure_mock::Options,
}

fn main() -> Result<()> {
    let Cli {
        directory,
        file_name,
        options,
    } = Cli::try_parse()?;

    let mut am = AllureMock::new(options);
    println!("Using seed `{}` to generate random data.", am.get_seed());

    let test_suite = am.generate_test_suite();
    let path = am.write_test_suite_to_file(directory, &file_name, &test_suite)?;
    println!("Wrote {} test cases to {}", test_suite.test_cases.len(), path.display());

    Ok(())
}
