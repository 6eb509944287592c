pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub const LOG_FILTER_ENV: &str = "ALLURE_SUITE_LOG";

/// Text of the `message` element the test runner writes for ignored tests.
pub const IGNORED_TEST_MESSAGE: &str = "This test was ignored";

pub mod tags {
    pub const TEST_SUITE: &str = "ns2:test-suite";
    pub const TEST_CASE: &str = "test-case";
    pub const NAME: &str = "name";
    pub const TITLE: &str = "title";
    pub const LABELS: &str = "labels";
    pub const LABEL: &str = "label";
    pub const STEP: &str = "step";
    pub const MESSAGE: &str = "message";
}

pub mod attrs {
    pub const NAME: &str = "name";
    pub const VALUE: &str = "value";
    pub const STATUS: &str = "status";
    pub const START: &str = "start";
    pub const STOP: &str = "stop";
}

pub mod labels {
    pub const TMS: &str = "tms";
    pub const FEATURE: &str = "feature";
    pub const ACTUAL_RESULTS: &str = "actualResults";
}

pub mod status {
    pub const PASSED: &str = "passed";
    pub const FAILED: &str = "failed";
    pub const BROKEN: &str = "broken";
    pub const PENDING: &str = "pending";
    pub const BLOCKED: &str = "blocked";
}
