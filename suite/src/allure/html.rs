//! HTML fragments handed to a test-management backend.
//!
//! Values are inserted as they are; callers own any escaping.

use super::model::TestSuite;

const LINE_BREAK: &str = "<br />";
const NON_BREAKING_SPACE: &str = "&nbsp;";

fn html_whitespace(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
        .replace('\t', NON_BREAKING_SPACE)
}

pub fn get_description(description: &str) -> String {
    html_whitespace(description)
}

pub fn get_actual_results(test_suite: &TestSuite, actual_results_from_ui: &str) -> String {
    html_whitespace(&format!(
        "<p>{}{LINE_BREAK}{}</p>",
        test_suite.actual_results.as_deref().unwrap_or_default(),
        actual_results_from_ui
    ))
}

pub fn get_test_cases_summary(test_suite: &TestSuite) -> String {
    let mut data = String::from("<p>Tested actions are:</p>");
    data.push_str("<p>&nbsp;</p>");

    data.push_str(r#"<table border="1" cellpadding="1" cellspacing="1" style="width:100%">"#);
    data.push_str("<tbody>");

    for test_case in &test_suite.test_cases {
        data.push_str("<tr>");
        data.push_str(&format!("\t<td><strong>{}</strong></td>", test_case.name));
        data.push_str(&format!(" <td>{}</td>", test_case.description));
        data.push_str("</tr>");
    }

    data.push_str("</tbody>");
    data.push_str("</table>");

    data
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::allure::model::TestCase;

    #[test]
    fn description_converts_whitespace() {
        assert_eq!(get_description(""), "");
        assert_eq!(
            get_description("step 1\n\tdetail\n"),
            "step 1<br />&nbsp;detail<br />"
        );
    }

    #[test]
    fn actual_results_wraps_suite_and_ui_text() {
        let test_suite = TestSuite {
            actual_results: Some("prev".into()),
            ..Default::default()
        };
        assert_eq!(
            get_actual_results(&test_suite, "line1\nline2"),
            "<p>prev<br />line1<br />line2</p>"
        );
    }

    #[test]
    fn actual_results_without_suite_value() {
        assert_eq!(
            get_actual_results(&TestSuite::default(), "\tx"),
            "<p><br />&nbsp;x</p>"
        );
    }

    #[test]
    fn summary_has_one_row_per_test_case() {
        let test_suite = TestSuite {
            test_cases: vec![
                TestCase {
                    name: "login".into(),
                    description: "Log in".into(),
                    ..Default::default()
                },
                TestCase {
                    name: "logout".into(),
                    description: "Log out".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            get_test_cases_summary(&test_suite),
            concat!(
                "<p>Tested actions are:</p><p>&nbsp;</p>",
                r#"<table border="1" cellpadding="1" cellspacing="1" style="width:100%">"#,
                "<tbody>",
                "<tr>\t<td><strong>login</strong></td> <td>Log in</td></tr>",
                "<tr>\t<td><strong>logout</strong></td> <td>Log out</td></tr>",
                "</tbody></table>",
            )
        );
    }
}
