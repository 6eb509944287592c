use super::model::TestCase;

/// Ordering key for the test cases of a suite.
///
/// Suites are kept sorted descending by this key. Implementations must be
/// deterministic: the same test case always yields the same key.
pub trait TmsLink {
    fn tms_link(&self, test_case: &TestCase) -> String;
}

impl<F> TmsLink for F
where
    F: Fn(&TestCase) -> String,
{
    fn tms_link(&self, test_case: &TestCase) -> String {
        self(test_case)
    }
}

/// Keys a test case by its first `tms` label, or the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TmsLabel;

impl TmsLink for TmsLabel {
    fn tms_link(&self, test_case: &TestCase) -> String {
        test_case.tms().map(String::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allure::model::Label;

    #[test]
    fn tms_label_uses_first_tms_label() {
        let test_case = TestCase {
            labels: vec![
                Label::new("feature", "Login"),
                Label::new("tms", "T-2"),
                Label::new("tms", "T-9"),
            ],
            ..Default::default()
        };
        assert_eq!(TmsLabel.tms_link(&test_case), "T-2");
        assert_eq!(TmsLabel.tms_link(&TestCase::default()), "");
    }

    #[test]
    fn closures_are_keys() {
        let by_name = |test_case: &TestCase| test_case.name.to_uppercase();
        let test_case = TestCase {
            name: String::from("login"),
            ..Default::default()
        };
        assert_eq!(by_name.tms_link(&test_case), "LOGIN");
    }
}
