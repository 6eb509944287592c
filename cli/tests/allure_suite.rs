use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use test_utils::mock_report::{seeded_options, write_mock_report};

const BIN: &str = "allure-suite";

fn allure_suite() -> Command {
    let mut command = Command::cargo_bin(BIN).unwrap();
    command.env("ALLURE_SUITE_LOG", "warn");
    command
}

#[test]
fn parse_prints_suite_json() {
    let temp_dir = tempdir().unwrap();
    let (mock_suite, path) = write_mock_report(&temp_dir, "report.xml", seeded_options(7, 8));

    let assert = allure_suite()
        .args(["parse", path.to_str().unwrap()])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["id"], mock_suite.name.as_str());
    assert_eq!(json["name"], mock_suite.title.as_str());
    assert_eq!(
        json["testCases"].as_array().unwrap().len(),
        mock_suite.test_cases.iter().filter(|tc| !tc.ignored).count()
    );
}

#[test]
fn parse_merges_reports_in_order() {
    let temp_dir = tempdir().unwrap();
    let (first, first_path) = write_mock_report(&temp_dir, "first.xml", seeded_options(1, 5));
    let (second, second_path) = write_mock_report(&temp_dir, "second.xml", seeded_options(2, 5));

    let assert = allure_suite()
        .args([
            "parse",
            first_path.to_str().unwrap(),
            second_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["id"], first.name.as_str());

    let mut expected: Vec<&str> = first
        .test_cases
        .iter()
        .chain(second.test_cases.iter())
        .filter(|tc| !tc.ignored)
        .map(|tc| tc.name.as_str())
        .collect();
    expected.sort_unstable();
    expected.dedup();
    let mut parsed: Vec<&str> = json["testCases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tc| tc["uuid"].as_str().unwrap())
        .collect();
    parsed.sort_unstable();
    assert_eq!(parsed, expected);
}

#[test]
fn status_prints_a_single_status() {
    let temp_dir = tempdir().unwrap();
    let (_, path) = write_mock_report(&temp_dir, "report.xml", seeded_options(42, 10));

    allure_suite()
        .args(["status", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^(passed|failed|broken|pending|blocked|)\n$").unwrap());
}

#[test]
fn summary_with_actual_results() {
    let temp_dir = tempdir().unwrap();
    let (_, path) = write_mock_report(&temp_dir, "report.xml", seeded_options(42, 3));

    allure_suite()
        .args([
            "summary",
            path.to_str().unwrap(),
            "--actual-results",
            "checked\tby hand",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<p>Tested actions are:</p>"))
        .stdout(predicate::str::contains("checked&nbsp;by hand</p>"));
}

#[test]
fn steps_prints_json_array() {
    let temp_dir = tempdir().unwrap();
    let (_, path) = write_mock_report(&temp_dir, "report.xml", seeded_options(3, 4));

    let assert = allure_suite()
        .args(["steps", path.to_str().unwrap()])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    for step in json.as_array().unwrap() {
        assert!(step["action"].is_string());
        assert_eq!(step["expectedResult"], "");
    }
}

#[test]
fn missing_report_fails() {
    let temp_dir = tempdir().unwrap();

    allure_suite()
        .current_dir(&temp_dir)
        .args(["parse", "missing.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open report missing.xml"));
}

#[test]
fn malformed_report_fails_unless_skipped() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("malformed.xml");
    std::fs::write(
        &path,
        r#"<ns2:test-suite><name>s</name><title>S</title>
            <test-case status="passed"><title>no name</title></test-case>
            <test-case status="passed"><name>ok</name><title>Ok</title></test-case>
        </ns2:test-suite>"#,
    )
    .unwrap();

    allure_suite()
        .args(["status", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing <name> in <test-case>"));

    allure_suite()
        .env("ALLURE_SUITE_ON_MALFORMED", "skip")
        .args(["status", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("passed\n");
}

#[test]
fn files_are_required() {
    allure_suite()
        .arg("parse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILES>..."));
}
