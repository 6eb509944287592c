//! Diagnostics emitted while a report is parsed.
//!
//! Observers only watch: nothing they do changes the parsed suite.

use std::cell::RefCell;

use crate::error::MalformedReportError;

use super::model::{Label, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingField {
    Start,
    Stop,
}

pub trait ParseObserver {
    fn test_case(&self, _name: &str, _status: &str) {}

    fn label(&self, _test_case: &str, _label: &Label) {}

    fn step(&self, _test_case: &str, _step: &Step) {}

    fn skipped_test_case(&self, _name: &str) {}

    fn malformed_test_case(&self, _index: usize, _error: &MalformedReportError) {}

    /// A `start`/`stop` attribute was missing or not a number.
    fn invalid_timing(&self, _element: &str, _field: TimingField, _raw: Option<&str>) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn test_case(&self, name: &str, status: &str) {
        tracing::info!("TEST CASE: {} ( {} )", name, status);
    }

    fn label(&self, _test_case: &str, label: &Label) {
        tracing::debug!(" - LABEL: {} - {}", label.name, label.value);
    }

    fn step(&self, _test_case: &str, step: &Step) {
        tracing::debug!(
            "   STEP {}: {} ({})",
            step.number_of_step.unwrap_or_default(),
            step.name,
            step.status
        );
    }

    fn skipped_test_case(&self, name: &str) {
        tracing::info!("Skipping ignored test case {}", name);
    }

    fn malformed_test_case(&self, index: usize, error: &MalformedReportError) {
        tracing::warn!("Skipping malformed test case #{}: {}", index + 1, error);
    }

    fn invalid_timing(&self, element: &str, field: TimingField, raw: Option<&str>) {
        tracing::warn!(
            "{} has no numeric {:?} timestamp (found {:?})",
            element,
            field,
            raw
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    TestCase {
        name: String,
        status: String,
    },
    Label {
        test_case: String,
        label: Label,
    },
    Step {
        test_case: String,
        name: String,
        status: String,
    },
    SkippedTestCase(String),
    MalformedTestCase {
        index: usize,
        error: MalformedReportError,
    },
    InvalidTiming {
        element: String,
        field: TimingField,
        raw: Option<String>,
    },
}

/// Keeps every event so a caller can present diagnostics after the parse.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: RefCell<Vec<ParseEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn events(&self) -> Vec<ParseEvent> {
        self.events.borrow().clone()
    }

    pub fn into_events(self) -> Vec<ParseEvent> {
        self.events.into_inner()
    }

    fn push(&self, event: ParseEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ParseObserver for CollectingObserver {
    fn test_case(&self, name: &str, status: &str) {
        self.push(ParseEvent::TestCase {
            name: name.into(),
            status: status.into(),
        });
    }

    fn label(&self, test_case: &str, label: &Label) {
        self.push(ParseEvent::Label {
            test_case: test_case.into(),
            label: label.clone(),
        });
    }

    fn step(&self, test_case: &str, step: &Step) {
        self.push(ParseEvent::Step {
            test_case: test_case.into(),
            name: step.name.clone(),
            status: step.status.clone(),
        });
    }

    fn skipped_test_case(&self, name: &str) {
        self.push(ParseEvent::SkippedTestCase(name.into()));
    }

    fn malformed_test_case(&self, index: usize, error: &MalformedReportError) {
        self.push(ParseEvent::MalformedTestCase {
            index,
            error: error.clone(),
        });
    }

    fn invalid_timing(&self, element: &str, field: TimingField, raw: Option<&str>) {
        self.push(ParseEvent::InvalidTiming {
            element: element.into(),
            field,
            raw: raw.map(String::from),
        });
    }
}
