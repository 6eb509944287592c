use thiserror::Error;

use crate::document::DocumentError;

/// An element the parse needs is absent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing <{element}> in <{parent}>")]
pub struct MalformedReportError {
    pub element: &'static str,
    pub parent: &'static str,
}

impl MalformedReportError {
    pub fn new(element: &'static str, parent: &'static str) -> Self {
        Self { element, parent }
    }
}

#[derive(Error, Debug)]
pub enum SuiteParseError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("malformed report: {0}")]
    Malformed(#[from] MalformedReportError),
}
