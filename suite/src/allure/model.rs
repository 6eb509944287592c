use constants::labels;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// One step of a test case. Steps own their sub-steps.
///
/// `start` and `stop` are epoch milliseconds; `None` stands for a value the
/// report did not carry as a number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub name: String,
    pub action: String,
    pub expected_result: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    pub stage: String,
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub parameters: Vec<Parameter>,
    pub steps: Vec<Step>,
    /// 1-based position among the parsed steps. Placeholder steps have none.
    pub number_of_step: Option<usize>,
    pub is_action: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Same as `name`: test cases are identified by name.
    pub uuid: String,
    pub history_id: String,
    pub labels: Vec<Label>,
    pub links: Vec<Link>,
    pub name: String,
    pub status: String,
    pub stage: String,
    pub description: String,
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub steps: Vec<Step>,
}

impl TestCase {
    /// Value of the first label called `name`.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.value.as_str())
    }

    pub fn tms(&self) -> Option<&str> {
        self.label(labels::TMS)
    }
}

/// Test cases stay unique by `uuid`; see [`TestSuite::add_test_case`] for
/// the ordering rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_results: Option<String>,
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn test_case(&self, uuid: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|test_case| test_case.uuid == uuid)
    }
}

/// A flattened step as consumed by a test-management backend update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepToUpdate {
    pub action: String,
    pub expected_result: String,
}

impl StepToUpdate {
    pub fn new<A: Into<String>, E: Into<String>>(action: A, expected_result: E) -> Self {
        Self {
            action: action.into(),
            expected_result: expected_result.into(),
        }
    }
}
