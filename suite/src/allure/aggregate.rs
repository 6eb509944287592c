use std::cmp::Reverse;

use constants::status;

use super::{
    model::{Step, StepToUpdate, TestCase, TestSuite},
    tms_link::TmsLink,
};

/// A failed test case overrides whatever status its step had.
pub fn get_step_status<'a>(current_status: &'a str, test_case_status: &'a str) -> &'a str {
    if test_case_status == status::FAILED {
        test_case_status
    } else {
        current_status
    }
}

impl TestSuite {
    /// Inserts `test_case`, or replaces the test case with the same uuid.
    ///
    /// Only an insertion re-sorts the suite (descending by `tms_link`, ties
    /// keep their order); a replacement stays where the old entry was.
    pub fn add_test_case<K: TmsLink + ?Sized>(&mut self, test_case: TestCase, tms_link: &K) {
        match self
            .test_cases
            .iter()
            .position(|existing| existing.uuid == test_case.uuid)
        {
            Some(index) => self.test_cases[index] = test_case,
            None => {
                self.test_cases.push(test_case);
                self.test_cases
                    .sort_by_cached_key(|test_case| Reverse(tms_link.tms_link(test_case)));
            }
        }
    }

    /// Folds the test cases of another parse into this suite. The identity of
    /// `self` is kept; its actual results are only filled in when empty.
    pub fn merge<K: TmsLink + ?Sized>(&mut self, other: TestSuite, tms_link: &K) {
        let TestSuite {
            actual_results,
            test_cases,
            ..
        } = other;
        for test_case in test_cases {
            self.add_test_case(test_case, tms_link);
        }
        if self.actual_results.as_deref().unwrap_or_default().is_empty() {
            if let Some(actual_results) = actual_results {
                self.actual_results = Some(actual_results);
            }
        }
    }

    /// The first test case, in suite order, whose status is neither `passed`
    /// nor `pending` decides the suite status. An empty suite has no status;
    /// otherwise it defaults to `passed`.
    pub fn status(&self) -> &str {
        if self.test_cases.is_empty() {
            return "";
        }
        for test_case in &self.test_cases {
            match test_case.status.as_str() {
                status::FAILED => return status::FAILED,
                status::BLOCKED => return status::BLOCKED,
                status::PASSED | status::PENDING => (),
                other => return other,
            }
        }
        status::PASSED
    }

    /// Flattens every test case's steps, depth first, for a backend update.
    /// The first step of each test case is prefixed with its description.
    pub fn steps_to_update(&self) -> Vec<StepToUpdate> {
        let mut steps_to_update = Vec::new();
        for test_case in &self.test_cases {
            if test_case.steps.is_empty() {
                steps_to_update.push(StepToUpdate::new(test_case.description.as_str(), ""));
            } else {
                flatten_steps(
                    &test_case.steps,
                    Some(&test_case.description),
                    &mut steps_to_update,
                );
            }
        }
        steps_to_update
    }
}

fn flatten_steps(steps: &[Step], prefix: Option<&str>, steps_to_update: &mut Vec<StepToUpdate>) {
    for (index, step) in steps.iter().enumerate() {
        let action = match prefix {
            Some(prefix) if index == 0 => format!("{prefix}{}", step.action),
            _ => step.action.clone(),
        };
        steps_to_update.push(StepToUpdate::new(action, step.expected_result.as_str()));
        if !step.steps.is_empty() {
            flatten_steps(&step.steps, None, steps_to_update);
        }
    }
}
