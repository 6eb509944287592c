use std::io::BufRead;

use constants::{labels, tags};

use crate::{
    document::{Element, XmlDocument},
    error::{MalformedReportError, SuiteParseError},
    options::{FallbackScope, MalformedPolicy, ParseOptions},
};

use super::{
    extractor::parse_attr,
    model::{Label, TestSuite},
    normalizer::{normalize_test_case, NormalizedTestCase},
    observer::{ParseObserver, TracingObserver},
    tms_link::{TmsLabel, TmsLink},
};

/// Suite-level fields that the first test case carrying the matching label
/// may supply.
#[derive(Debug, Clone, Default)]
struct SuiteIdentity {
    id: Option<String>,
    name: Option<String>,
    actual_results: Option<String>,
}

impl SuiteIdentity {
    fn from_test_suite_element(element: Option<&Element>) -> Self {
        Self {
            id: element.and_then(|e| parse_attr::child_text(e, tags::NAME)),
            name: element.and_then(|e| parse_attr::child_text(e, tags::TITLE)),
            actual_results: None,
        }
    }

    fn resolve_from_labels(&mut self, test_case_labels: &[Label]) {
        for label in test_case_labels {
            if self.id.is_none() && label.name == labels::TMS {
                self.id = Some(label.value.clone());
            }
            if self.name.is_none() && label.name == labels::FEATURE {
                self.name = Some(label.value.clone());
            }
            if self.actual_results.as_deref().unwrap_or_default().is_empty()
                && label.name == labels::ACTUAL_RESULTS
            {
                self.actual_results = Some(label.value.clone());
            }
        }
    }
}

/// Turns an Allure 1 XML report into a [`TestSuite`].
pub struct SuiteParser<'a> {
    options: ParseOptions,
    observer: &'a dyn ParseObserver,
    tms_link: &'a dyn TmsLink,
}

impl Default for SuiteParser<'_> {
    fn default() -> Self {
        Self {
            options: ParseOptions::default(),
            observer: &TracingObserver,
            tms_link: &TmsLabel,
        }
    }
}

impl<'a> SuiteParser<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn ParseObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_tms_link(mut self, tms_link: &'a dyn TmsLink) -> Self {
        self.tms_link = tms_link;
        self
    }

    pub fn tms_link(&self) -> &'a dyn TmsLink {
        self.tms_link
    }

    pub fn parse<R: BufRead>(&self, xml: R) -> Result<TestSuite, SuiteParseError> {
        let document = XmlDocument::parse(xml)?;
        self.parse_from_document(&document)
    }

    pub fn parse_from_document(&self, document: &XmlDocument) -> Result<TestSuite, SuiteParseError> {
        let test_suite_element = document.first_element_by_tag_name(tags::TEST_SUITE);
        let mut identity = SuiteIdentity::from_test_suite_element(test_suite_element);
        let mut test_suite = TestSuite::default();

        for (index, element) in document
            .elements_by_tag_name(tags::TEST_CASE)
            .into_iter()
            .enumerate()
        {
            let NormalizedTestCase { test_case, skipped } =
                match normalize_test_case(element, self.observer) {
                    Ok(normalized) => normalized,
                    Err(e) => match self.options.on_malformed_test_case {
                        MalformedPolicy::Abort => return Err(e.into()),
                        MalformedPolicy::Skip => {
                            self.observer.malformed_test_case(index, &e);
                            continue;
                        }
                    },
                };

            // Ignored test cases still count towards the suite identity.
            identity.resolve_from_labels(&test_case.labels);

            if !skipped {
                test_suite.add_test_case(test_case, self.tms_link);
            }
        }

        let fallback = |tag: &str| -> Option<String> {
            let element = match self.options.fallback_scope {
                FallbackScope::Document => document.first_element_by_tag_name(tag),
                FallbackScope::TestSuite => {
                    test_suite_element.and_then(|e| e.first_element_by_tag_name(tag))
                }
            };
            element.map(Element::text_content)
        };

        test_suite.id = resolve_or_fallback(identity.id, || fallback(tags::NAME))
            .ok_or_else(|| MalformedReportError::new(tags::NAME, tags::TEST_SUITE))?;
        test_suite.name = resolve_or_fallback(identity.name, || fallback(tags::TITLE))
            .ok_or_else(|| MalformedReportError::new(tags::TITLE, tags::TEST_SUITE))?;
        test_suite.actual_results = identity.actual_results;

        Ok(test_suite)
    }
}

fn resolve_or_fallback<F>(resolved: Option<String>, fallback: F) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    match resolved {
        Some(value) if !value.is_empty() => Some(value),
        unresolved => fallback().or(unresolved),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::allure::observer::NoopObserver;

    fn parse(xml: &str) -> Result<TestSuite, SuiteParseError> {
        SuiteParser::new()
            .with_observer(&NoopObserver)
            .parse(xml.as_bytes())
    }

    #[test]
    fn resolves_identity_from_first_labelled_test_case() {
        let mut identity = SuiteIdentity::default();
        identity.resolve_from_labels(&[Label::new("feature", "Cart")]);
        identity.resolve_from_labels(&[
            Label::new("tms", "T-1"),
            Label::new("feature", "Checkout"),
            Label::new("actualResults", ""),
        ]);
        identity.resolve_from_labels(&[
            Label::new("tms", "T-2"),
            Label::new("actualResults", "it broke"),
        ]);

        assert_eq!(identity.id.as_deref(), Some("T-1"));
        assert_eq!(identity.name.as_deref(), Some("Cart"));
        assert_eq!(identity.actual_results.as_deref(), Some("it broke"));
    }

    #[test]
    fn fallback_only_when_unresolved_or_empty() {
        assert_eq!(
            resolve_or_fallback(Some("kept".into()), || Some("fallback".into())),
            Some("kept".into())
        );
        assert_eq!(
            resolve_or_fallback(Some(String::new()), || Some("fallback".into())),
            Some("fallback".into())
        );
        assert_eq!(
            resolve_or_fallback(Some(String::new()), || None),
            Some(String::new())
        );
        assert_eq!(resolve_or_fallback(None, || None), None);
    }

    #[test]
    fn empty_suite() {
        let test_suite = parse(
            r#"<ns2:test-suite xmlns:ns2="urn:model"><name>suite-id</name><title>Suite</title><test-cases/></ns2:test-suite>"#,
        )
        .unwrap();
        assert_eq!(test_suite, TestSuite::new("suite-id", "Suite"));
        assert_eq!(test_suite.status(), "");
    }

    #[test]
    fn labels_fill_missing_suite_element() {
        let test_suite = parse(
            r#"<report><test-cases>
                <test-case status="passed"><name>a</name><title>A</title>
                    <labels><label name="tms" value="T-5"/><label name="feature" value="Search"/></labels>
                </test-case>
            </test-cases></report>"#,
        )
        .unwrap();
        assert_eq!(test_suite.id, "T-5");
        assert_eq!(test_suite.name, "Search");
    }

    #[test]
    fn document_fallback_uses_first_name_anywhere() {
        let test_suite = parse(
            r#"<report><test-case status="passed"><name>a</name><title>A</title></test-case></report>"#,
        )
        .unwrap();
        assert_eq!(test_suite.id, "a");
        assert_eq!(test_suite.name, "A");
    }

    #[test]
    fn test_suite_fallback_scope_requires_suite_element() {
        let result = SuiteParser::new()
            .with_observer(&NoopObserver)
            .with_options(ParseOptions {
                fallback_scope: FallbackScope::TestSuite,
                ..Default::default()
            })
            .parse(
                r#"<report><test-case><name>a</name><title>A</title></test-case></report>"#
                    .as_bytes(),
            );
        assert!(matches!(
            result,
            Err(SuiteParseError::Malformed(MalformedReportError {
                element: "name",
                parent: "ns2:test-suite"
            }))
        ));
    }

    #[test]
    fn fallback_scope_decides_whether_outer_elements_count() {
        const XML: &str = r#"<report>
            <name>outer</name><title>Outer</title>
            <ns2:test-suite><name></name><title></title>
                <test-case status="passed"><name>a</name><title>A</title></test-case>
            </ns2:test-suite>
        </report>"#;
        let parse_with_scope = |fallback_scope: FallbackScope| {
            SuiteParser::new()
                .with_observer(&NoopObserver)
                .with_options(ParseOptions {
                    fallback_scope,
                    ..Default::default()
                })
                .parse(XML.as_bytes())
                .unwrap()
        };

        let document_scope = parse_with_scope(FallbackScope::Document);
        assert_eq!(document_scope.id, "outer");
        assert_eq!(document_scope.name, "Outer");

        let test_suite_scope = parse_with_scope(FallbackScope::TestSuite);
        assert_eq!(test_suite_scope.id, "");
        assert_eq!(test_suite_scope.name, "");
        assert_eq!(test_suite_scope.test_cases.len(), 1);
    }

    #[test]
    fn malformed_test_case_aborts_by_default() {
        let result = parse(
            r#"<ns2:test-suite><name>s</name><title>S</title>
                <test-case><title>no name</title></test-case>
            </ns2:test-suite>"#,
        );
        assert!(matches!(
            result,
            Err(SuiteParseError::Malformed(MalformedReportError {
                element: "name",
                parent: "test-case"
            }))
        ));
    }
}
