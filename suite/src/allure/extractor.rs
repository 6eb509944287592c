use constants::{attrs, tags};

use crate::{document::Element, error::MalformedReportError};

use super::{
    model::{Label, Step},
    observer::{ParseObserver, TimingField},
};

/// Labels of the first `labels` element under `parent`, in document order.
///
/// A test case without a `labels` element simply has no labels.
pub fn parse_labels(parent: &Element) -> Vec<Label> {
    parent
        .first_element_by_tag_name(tags::LABELS)
        .map(|labels| {
            labels
                .elements_by_tag_name(tags::LABEL)
                .into_iter()
                .map(|label| {
                    Label::new(
                        label.attribute(attrs::NAME).unwrap_or_default(),
                        label.attribute(attrs::VALUE).unwrap_or_default(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Every `step` element below `parent`, flattened in document order and
/// numbered from 1.
pub fn parse_steps(
    parent: &Element,
    test_case_name: &str,
    observer: &dyn ParseObserver,
) -> Result<Vec<Step>, MalformedReportError> {
    parent
        .elements_by_tag_name(tags::STEP)
        .into_iter()
        .enumerate()
        .map(|(i, step_element)| {
            let name = parse_attr::child_text(step_element, tags::NAME)
                .ok_or_else(|| MalformedReportError::new(tags::NAME, tags::STEP))?;
            let step = Step {
                action: name.clone(),
                status: step_element
                    .attribute(attrs::STATUS)
                    .unwrap_or_default()
                    .to_string(),
                start: parse_attr::timestamp(step_element, TimingField::Start, &name, observer),
                stop: parse_attr::timestamp(step_element, TimingField::Stop, &name, observer),
                number_of_step: Some(i + 1),
                is_action: true,
                name,
                ..Default::default()
            };
            observer.step(test_case_name, &step);
            Ok(step)
        })
        .collect()
}

pub(crate) mod parse_attr {
    use constants::attrs;

    use crate::{
        allure::observer::{ParseObserver, TimingField},
        document::Element,
    };

    /// Text of the first `tag` element below `parent`.
    pub fn child_text(parent: &Element, tag: &str) -> Option<String> {
        parent
            .first_element_by_tag_name(tag)
            .map(Element::text_content)
    }

    /// Epoch milliseconds from the `start`/`stop` attribute. Anything that is
    /// not a number comes back as `None` and is reported, never rejected.
    pub fn timestamp(
        element: &Element,
        field: TimingField,
        owner: &str,
        observer: &dyn ParseObserver,
    ) -> Option<i64> {
        let attr_name = match field {
            TimingField::Start => attrs::START,
            TimingField::Stop => attrs::STOP,
        };
        let raw = element.attribute(attr_name);
        let parsed = raw.and_then(parse_millis);
        if parsed.is_none() {
            observer.invalid_timing(owner, field, raw);
        }
        parsed
    }

    pub fn parse_millis(raw: &str) -> Option<i64> {
        let raw = raw.trim();
        raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|millis| millis.is_finite())
                .map(|millis| millis.trunc() as i64)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse_attr::parse_millis, *};
    use crate::{allure::observer::NoopObserver, document::XmlDocument};

    fn test_case_element(document: &XmlDocument) -> &Element {
        document.first_element_by_tag_name("test-case").unwrap()
    }

    #[test]
    fn labels_are_verbatim() {
        let document = XmlDocument::from_str(
            r#"<test-case><labels>
                <label name="tms" value="T-1"/>
                <label name=" Feature " value=" Log In "/>
                <label value="orphan"/>
            </labels></test-case>"#,
        )
        .unwrap();
        assert_eq!(
            parse_labels(test_case_element(&document)),
            vec![
                Label::new("tms", "T-1"),
                Label::new(" Feature ", " Log In "),
                Label::new("", "orphan"),
            ]
        );
    }

    #[test]
    fn missing_labels_element_is_empty() {
        let document = XmlDocument::from_str("<test-case><name>a</name></test-case>").unwrap();
        assert!(parse_labels(test_case_element(&document)).is_empty());
    }

    #[test]
    fn only_first_labels_element_is_read() {
        let document = XmlDocument::from_str(
            r#"<test-case>
                <labels><label name="a" value="1"/></labels>
                <labels><label name="b" value="2"/></labels>
            </test-case>"#,
        )
        .unwrap();
        assert_eq!(
            parse_labels(test_case_element(&document)),
            vec![Label::new("a", "1")]
        );
    }

    #[test]
    fn steps_are_numbered_and_defaulted() {
        let document = XmlDocument::from_str(
            r#"<test-case>
                <steps>
                    <step status="passed" start="10" stop="20"><name>open page</name><title>Open</title></step>
                    <step status="failed" start="oops"><name>click</name></step>
                </steps>
            </test-case>"#,
        )
        .unwrap();
        let steps = parse_steps(test_case_element(&document), "tc", &NoopObserver).unwrap();
        assert_eq!(
            steps,
            vec![
                Step {
                    name: "open page".into(),
                    action: "open page".into(),
                    status: "passed".into(),
                    start: Some(10),
                    stop: Some(20),
                    number_of_step: Some(1),
                    is_action: true,
                    ..Default::default()
                },
                Step {
                    name: "click".into(),
                    action: "click".into(),
                    status: "failed".into(),
                    start: None,
                    stop: None,
                    number_of_step: Some(2),
                    is_action: true,
                    ..Default::default()
                },
            ]
        );
    }

    #[test]
    fn nested_steps_are_flattened() {
        let document = XmlDocument::from_str(
            r#"<test-case><steps>
                <step><name>outer</name><steps><step><name>inner</name></step></steps></step>
                <step><name>last</name></step>
            </steps></test-case>"#,
        )
        .unwrap();
        let names: Vec<_> = parse_steps(test_case_element(&document), "tc", &NoopObserver)
            .unwrap()
            .into_iter()
            .map(|step| (step.number_of_step, step.name))
            .collect();
        assert_eq!(
            names,
            vec![
                (Some(1), "outer".to_string()),
                (Some(2), "inner".to_string()),
                (Some(3), "last".to_string()),
            ]
        );
    }

    #[test]
    fn step_without_name_is_malformed() {
        let document =
            XmlDocument::from_str("<test-case><step status=\"passed\"/></test-case>").unwrap();
        assert_eq!(
            parse_steps(test_case_element(&document), "tc", &NoopObserver),
            Err(MalformedReportError::new("name", "step"))
        );
    }

    #[test]
    fn millis_accept_integers_and_decimals() {
        assert_eq!(parse_millis("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_millis(" 42 "), Some(42));
        assert_eq!(parse_millis("1.5e3"), Some(1500));
        assert_eq!(parse_millis(""), None);
        assert_eq!(parse_millis("NaN"), None);
        assert_eq!(parse_millis("soon"), None);
    }
}
