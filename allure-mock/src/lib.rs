use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::Parser;
use constants::{status, IGNORED_TEST_MESSAGE};
use fake::Fake;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rand::prelude::*;
use rand::rngs::StdRng;

const ALLURE_NAMESPACE: &str = "urn:model.allure.qatools.yandex.ru";

const STATUSES: [&str; 5] = [
    status::PASSED,
    status::FAILED,
    status::BROKEN,
    status::PENDING,
    status::BLOCKED,
];

macro_rules! percentages_parser {
    ($func_name:ident, $num_percentages:literal) => {
        fn $func_name(argument: &str) -> std::result::Result<Vec<u8>, clap::Error> {
            argument
                .split(',')
                .enumerate()
                .try_fold((0_u8, Vec::new()), |mut acc, (i, percentage_str)| {
                    if i >= $num_percentages {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            format!("More than {} percentages provided", $num_percentages),
                        ));
                    }
                    let percentage = percentage_str
                        .parse::<u8>()
                        .map_err(|e| clap::Error::raw(clap::error::ErrorKind::InvalidValue, e))?;

                    if percentage > 100 {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            format!("Percentage at index {} is greater than 100", i),
                        ));
                    }

                    acc.0 += percentage;

                    if acc.0 > 100 {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            "Sum of percentages are greater than 100",
                        ));
                    }

                    acc.1.push(percentage);

                    Ok(acc)
                })
                .map(|v| v.1)
        }
    };
}

#[derive(Debug, Parser, Clone)]
pub struct Options {
    #[command(flatten, next_help_heading = "Global Options")]
    pub global: GlobalOptions,

    #[command(flatten, next_help_heading = "Test Suite Options")]
    pub test_suite: TestSuiteOptions,

    #[command(flatten, next_help_heading = "Test Case Options")]
    pub test_case: TestCaseOptions,

    #[command(flatten, next_help_heading = "Step Options")]
    pub step: StepOptions,
}

impl Default for Options {
    fn default() -> Self {
        Options::try_parse_from([""]).unwrap()
    }
}

#[test]
fn options_can_be_defaulted_without_panicing() {
    Options::default();
}

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct GlobalOptions {
    /// Seed for all generated data, defaults to randomly generated seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Timestamp for all data to be based on, defaults to now
    #[arg(long)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct TestSuiteOptions {
    /// Name (id) of the test suite, defaults to a random name
    #[arg(long)]
    pub test_suite_name: Option<String>,

    /// Title of the test suite, defaults to a random title
    #[arg(long)]
    pub test_suite_title: Option<String>,

    /// Serialize the report without the `ns2:test-suite` element, wrapping test cases in `report`
    #[arg(long)]
    pub do_not_render_test_suite_element: bool,
}

percentages_parser!(five_percentages_parser, 5);

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct TestCaseOptions {
    /// A list of test case names to generate (conflicts with --test-case-random-count)
    #[arg(
        long,
        value_delimiter = ',',
        conflicts_with = "test_case_random_count"
    )]
    pub test_case_names: Option<Vec<String>>,

    /// The number of test cases with random, unique names to generate (conflicts with --test-case-names)
    #[arg(long, conflicts_with = "test_case_names", default_value = "10")]
    pub test_case_random_count: usize,

    /// Inclusive range of time between test case timestamps
    #[arg(long, num_args = 1..=2, value_names = ["DURATION_RANGE_START", "DURATION_RANGE_END"], default_values = ["30s", "1m"])]
    pub test_case_duration_range: Vec<humantime::Duration>,

    /// The chance of a test case passing, failing, breaking, pending and being blocked (must add up to 100)
    #[arg(long, value_parser = five_percentages_parser, default_value = "40,20,20,10,10")]
    pub test_case_status_percentage: Vec<Vec<u8>>,

    /// The chance of a test case being marked as ignored
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), default_value = "10")]
    pub test_case_ignored_percentage: u8,

    /// The chance of a test case carrying a `tms` label
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), default_value = "80")]
    pub test_case_tms_label_percentage: u8,

    /// The chance of a test case carrying a `feature` label
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), default_value = "50")]
    pub test_case_feature_label_percentage: u8,

    /// The chance of a test case carrying an `actualResults` label
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), default_value = "20")]
    pub test_case_actual_results_label_percentage: u8,
}

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct StepOptions {
    /// Inclusive range of the number of steps per test case
    #[arg(long, num_args = 1..=2, value_names = ["COUNT_RANGE_START", "COUNT_RANGE_END"], default_values = ["0", "4"])]
    pub step_count_range: Vec<usize>,

    /// Inclusive range of time taken by each step
    #[arg(long, num_args = 1..=2, value_names = ["DURATION_RANGE_START", "DURATION_RANGE_END"], default_values = ["1s", "10s"])]
    pub step_duration_range: Vec<humantime::Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockStep {
    pub name: String,
    pub title: String,
    pub status: String,
    pub start: i64,
    pub stop: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTestCase {
    pub name: String,
    pub title: String,
    pub status: String,
    pub start: i64,
    pub stop: i64,
    pub ignored: bool,
    pub labels: Vec<(String, String)>,
    pub steps: Vec<MockStep>,
}

impl MockTestCase {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(label_name, _)| label_name == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTestSuite {
    pub name: String,
    pub title: String,
    pub start: i64,
    pub stop: i64,
    pub test_cases: Vec<MockTestCase>,
}

#[derive(Debug, Clone)]
pub struct AllureMock {
    seed: u64,
    options: Options,

    // state for generating reports
    rng: StdRng,
    timestamp: DateTime<FixedOffset>,
}

impl AllureMock {
    pub fn new(options: Options) -> Self {
        let (seed, rng) = AllureMock::rng_from_seed(&options);
        let timestamp = options.global.timestamp.unwrap_or_default();
        Self {
            seed,
            options,
            rng,
            timestamp,
        }
    }

    fn rng_from_seed(options: &Options) -> (u64, StdRng) {
        let seed = options.global.seed.unwrap_or_else(rand::random);
        (seed, StdRng::seed_from_u64(seed))
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    fn increment_duration(&mut self, duration: Duration) {
        self.timestamp += duration;
    }

    fn now_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn generate_test_suite(&mut self) -> MockTestSuite {
        self.timestamp = self
            .options
            .global
            .timestamp
            .unwrap_or_else(|| chrono::Utc::now().fixed_offset());

        let name = self
            .options
            .test_suite
            .test_suite_name
            .clone()
            .unwrap_or_else(|| fake::faker::company::en::Buzzword().fake_with_rng(&mut self.rng));
        let title = self
            .options
            .test_suite
            .test_suite_title
            .clone()
            .unwrap_or_else(|| fake::faker::lorem::en::Sentence(2..5).fake_with_rng(&mut self.rng));

        let start = self.now_millis();
        let test_cases = self.generate_test_cases();
        MockTestSuite {
            name,
            title,
            start,
            stop: self.now_millis(),
            test_cases,
        }
    }

    pub fn write_test_suite_to_file<T: AsRef<Path>>(
        &self,
        directory: T,
        file_name: &str,
        test_suite: &MockTestSuite,
    ) -> Result<PathBuf> {
        let path = directory.as_ref().join(file_name);
        let file = File::create(&path)?;
        self.serialize(file, test_suite)?;
        Ok(path)
    }

    pub fn to_xml_string(&self, test_suite: &MockTestSuite) -> Result<String> {
        let mut buf = Vec::new();
        self.serialize(&mut buf, test_suite)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn serialize<W: Write>(&self, writer: W, test_suite: &MockTestSuite) -> Result<()> {
        let mut writer = Writer::new_with_indent(writer, b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root_tag = if self.options.test_suite.do_not_render_test_suite_element {
            writer.write_event(Event::Start(BytesStart::new("report")))?;
            "report"
        } else {
            let mut root = BytesStart::new("ns2:test-suite");
            root.push_attribute(("xmlns:ns2", ALLURE_NAMESPACE));
            root.push_attribute(("start", test_suite.start.to_string().as_str()));
            root.push_attribute(("stop", test_suite.stop.to_string().as_str()));
            writer.write_event(Event::Start(root))?;
            write_text_element(&mut writer, "name", &test_suite.name)?;
            write_text_element(&mut writer, "title", &test_suite.title)?;
            "ns2:test-suite"
        };

        writer.write_event(Event::Start(BytesStart::new("test-cases")))?;
        for test_case in &test_suite.test_cases {
            write_test_case(&mut writer, test_case)?;
        }
        writer.write_event(Event::End(BytesEnd::new("test-cases")))?;

        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
        Ok(())
    }

    fn generate_test_cases(&mut self) -> Vec<MockTestCase> {
        self.options
            .test_case
            .test_case_names
            .as_ref()
            .cloned()
            .map(|mut test_case_names| {
                test_case_names.shuffle(&mut self.rng);
                test_case_names
            })
            .unwrap_or_else(|| {
                (0..self.options.test_case.test_case_random_count)
                    .map(|i| {
                        let buzzword: String =
                            fake::faker::company::en::Buzzword().fake_with_rng(&mut self.rng);
                        format!("{buzzword} {i}")
                    })
                    .collect()
            })
            .into_iter()
            .enumerate()
            .map(|(i, test_case_name)| -> MockTestCase {
                let start = self.now_millis();
                let ignored = self.rand_bool(self.options.test_case.test_case_ignored_percentage);
                let status = if ignored {
                    String::from(status::PENDING)
                } else {
                    self.generate_status()
                };
                let steps = if ignored {
                    Vec::new()
                } else {
                    self.generate_steps(&status)
                };
                let duration =
                    self.fake_duration(self.options.test_case.test_case_duration_range.clone());
                self.increment_duration(duration);

                let mut labels = Vec::new();
                if self.rand_bool(self.options.test_case.test_case_tms_label_percentage) {
                    labels.push((String::from("tms"), format!("T-{}", i + 1)));
                }
                if self.rand_bool(self.options.test_case.test_case_feature_label_percentage) {
                    labels.push((
                        String::from("feature"),
                        fake::faker::company::en::Bs().fake_with_rng(&mut self.rng),
                    ));
                }
                if self
                    .rand_bool(self.options.test_case.test_case_actual_results_label_percentage)
                {
                    labels.push((String::from("actualResults"), self.fake_paragraphs()));
                }

                MockTestCase {
                    title: self.fake_sentence(),
                    name: test_case_name,
                    status,
                    start,
                    stop: self.now_millis(),
                    ignored,
                    labels,
                    steps,
                }
            })
            .collect()
    }

    fn generate_steps(&mut self, test_case_status: &str) -> Vec<MockStep> {
        let range_start = *self
            .options
            .step
            .step_count_range
            .first()
            .expect("step count range must have a start");
        let range_end = *self
            .options
            .step
            .step_count_range
            .get(1)
            .unwrap_or(&range_start);
        let count = self.rng.gen_range(range_start..=range_end.max(range_start));
        (0..count)
            .map(|i| {
                let start = self.now_millis();
                let duration = self.fake_duration(self.options.step.step_duration_range.clone());
                self.increment_duration(duration);
                // Only the last step carries a non-passing test case status.
                let status = if i + 1 == count {
                    test_case_status.to_string()
                } else {
                    String::from(status::PASSED)
                };
                MockStep {
                    name: fake::faker::lorem::en::Word().fake_with_rng(&mut self.rng),
                    title: self.fake_sentence(),
                    status,
                    start,
                    stop: self.now_millis(),
                }
            })
            .collect()
    }

    fn generate_status(&mut self) -> String {
        let rand_percentage = self.rand_percentage();
        let mut total = 0_u8;
        for (i, percentage) in self
            .options
            .test_case
            .test_case_status_percentage
            .iter()
            .flatten()
            .enumerate()
        {
            let new_total = total + percentage;
            if (total..=new_total).contains(&rand_percentage) {
                return String::from(STATUSES[i]);
            }
            total = new_total;
        }
        String::from(status::PASSED)
    }

    fn fake_sentence(&mut self) -> String {
        let sentences: Vec<String> =
            fake::faker::lorem::en::Sentences(1..2).fake_with_rng(&mut self.rng);
        sentences.join(" ")
    }

    fn fake_paragraphs(&mut self) -> String {
        let paragraphs: Vec<String> =
            fake::faker::lorem::en::Paragraphs(1..3).fake_with_rng(&mut self.rng);
        paragraphs.join("\n")
    }

    fn fake_duration<T: AsRef<[humantime::Duration]>>(&mut self, range: T) -> Duration {
        let range_start = range
            .as_ref()
            .first()
            .expect("must have start range for duration")
            .as_millis();
        let range_end = range
            .as_ref()
            .get(1)
            .map(|end| end.as_millis())
            .unwrap_or(range_start);
        let rand_duration_ms = self.rng.gen_range(range_start..=range_end.max(range_start));
        Duration::from_millis(rand_duration_ms as u64)
    }

    fn rand_bool<T: Into<f64>>(&mut self, percentage_chance: T) -> bool {
        self.rng.gen_bool(percentage_chance.into() / 100.0)
    }

    fn rand_percentage(&mut self) -> u8 {
        self.rng.gen_range(0..=100)
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn timed_start<'a>(tag: &'a str, status: &str, start: i64, stop: i64) -> BytesStart<'a> {
    let mut element = BytesStart::new(tag);
    element.push_attribute(("start", start.to_string().as_str()));
    element.push_attribute(("stop", stop.to_string().as_str()));
    element.push_attribute(("status", status));
    element
}

fn write_test_case<W: Write>(writer: &mut Writer<W>, test_case: &MockTestCase) -> Result<()> {
    writer.write_event(Event::Start(timed_start(
        "test-case",
        &test_case.status,
        test_case.start,
        test_case.stop,
    )))?;
    write_text_element(writer, "name", &test_case.name)?;
    write_text_element(writer, "title", &test_case.title)?;

    if test_case.ignored {
        writer.write_event(Event::Start(BytesStart::new("failure")))?;
        write_text_element(writer, "message", IGNORED_TEST_MESSAGE)?;
        writer.write_event(Event::End(BytesEnd::new("failure")))?;
    }

    writer.write_event(Event::Start(BytesStart::new("steps")))?;
    for step in &test_case.steps {
        writer.write_event(Event::Start(timed_start(
            "step",
            &step.status,
            step.start,
            step.stop,
        )))?;
        write_text_element(writer, "name", &step.name)?;
        write_text_element(writer, "title", &step.title)?;
        writer.write_event(Event::End(BytesEnd::new("step")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("steps")))?;

    writer.write_event(Event::Start(BytesStart::new("labels")))?;
    for (name, value) in &test_case.labels {
        let mut label = BytesStart::new("label");
        label.push_attribute(("name", name.as_str()));
        label.push_attribute(("value", value.as_str()));
        writer.write_event(Event::Empty(label))?;
    }
    writer.write_event(Event::End(BytesEnd::new("labels")))?;

    writer.write_event(Event::End(BytesEnd::new("test-case")))?;
    Ok(())
}
