pub mod allure;
pub mod document;
pub mod error;
pub mod options;

pub use error::{MalformedReportError, SuiteParseError};
pub use options::{FallbackScope, MalformedPolicy, ParseOptions};
