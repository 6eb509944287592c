use constants::{attrs, tags, IGNORED_TEST_MESSAGE};

use crate::{document::Element, error::MalformedReportError};

use super::{
    extractor::{parse_attr, parse_labels, parse_steps},
    model::{Step, TestCase},
    observer::{ParseObserver, TimingField},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTestCase {
    pub test_case: TestCase,
    /// The runner marked this test case as ignored.
    pub skipped: bool,
}

/// Builds one [`TestCase`] from a `test-case` element.
///
/// The result always has at least one step: a test case without steps gets a
/// placeholder step mirroring its own name, status and timing.
pub fn normalize_test_case(
    element: &Element,
    observer: &dyn ParseObserver,
) -> Result<NormalizedTestCase, MalformedReportError> {
    let status = element
        .attribute(attrs::STATUS)
        .unwrap_or_default()
        .to_string();
    let name = parse_attr::child_text(element, tags::NAME)
        .ok_or_else(|| MalformedReportError::new(tags::NAME, tags::TEST_CASE))?;
    let description = parse_attr::child_text(element, tags::TITLE)
        .ok_or_else(|| MalformedReportError::new(tags::TITLE, tags::TEST_CASE))?;

    observer.test_case(&name, &status);

    let labels = parse_labels(element);
    for label in &labels {
        observer.label(&name, label);
    }

    let mut steps = parse_steps(element, &name, observer)?;
    let start = parse_attr::timestamp(element, TimingField::Start, &name, observer);
    let stop = parse_attr::timestamp(element, TimingField::Stop, &name, observer);

    if steps.is_empty() {
        steps.push(Step {
            name: name.clone(),
            action: name.clone(),
            status: status.clone(),
            start,
            stop,
            number_of_step: None,
            is_action: true,
            ..Default::default()
        });
    }

    let skipped = is_ignored(element);
    if skipped {
        observer.skipped_test_case(&name);
    }

    Ok(NormalizedTestCase {
        test_case: TestCase {
            uuid: name.clone(),
            labels,
            name,
            status,
            description,
            start,
            stop,
            steps,
            ..Default::default()
        },
        skipped,
    })
}

/// Exact match on the first child node of the first `message` element.
pub fn is_ignored(element: &Element) -> bool {
    element
        .first_element_by_tag_name(tags::MESSAGE)
        .and_then(Element::first_child_text)
        .is_some_and(|message| message == IGNORED_TEST_MESSAGE)
}
