/// What to do with a test case that lacks an element the parse needs.
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole parse.
    #[default]
    Abort,
    /// Leave the test case out and keep going.
    Skip,
}

/// Where the suite id/name fallback looks for `name` and `title` elements.
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FallbackScope {
    /// Anywhere in the document, which in practice is usually the first test case.
    #[default]
    Document,
    /// Only inside the `ns2:test-suite` element.
    TestSuite,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub on_malformed_test_case: MalformedPolicy,
    pub fallback_scope: FallbackScope,
}
