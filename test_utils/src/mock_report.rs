use std::path::{Path, PathBuf};

use allure_mock::{AllureMock, MockTestSuite, Options};
use chrono::DateTime;

pub const MOCK_TIMESTAMP: &str = "2024-06-01T12:00:00+00:00";

/// Mock options pinned to a seed and a fixed timestamp so failures can be
/// reproduced from the seed alone.
pub fn seeded_options(seed: u64, test_case_count: usize) -> Options {
    let mut options = Options::default();
    options.global.seed = Some(seed);
    options.global.timestamp = DateTime::parse_from_rfc3339(MOCK_TIMESTAMP).ok();
    options.test_case.test_case_random_count = test_case_count;
    options
}

pub fn generate_mock_report(options: Options) -> (u64, MockTestSuite, String) {
    let mut am = AllureMock::new(options);
    let seed = am.get_seed();
    let test_suite = am.generate_test_suite();
    let xml = am.to_xml_string(&test_suite).unwrap();
    (seed, test_suite, xml)
}

pub fn write_mock_report<T: AsRef<Path>>(
    directory: T,
    file_name: &str,
    options: Options,
) -> (MockTestSuite, PathBuf) {
    let mut am = AllureMock::new(options);
    let test_suite = am.generate_test_suite();
    let path = am
        .write_test_suite_to_file(directory, file_name, &test_suite)
        .unwrap();
    (test_suite, path)
}
