//! HTML rendering of the prediction form.
//!
//! The form is generated from the field schema, so it always lists the same
//! fields, options and order as the chat flow. Everything user-supplied is
//! escaped before it reaches the page.

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::intake::{FieldDefinition, FieldKind, FieldSchema};
use crate::domain::scoring::Verdict;

/// Message shown above the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Verdict(Verdict),
    Error(String),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:40em;margin:2em auto}\
label{display:block;margin-top:.6em}\
.result{padding:.6em;background:#e6f4ea}\
.error{padding:.6em;background:#fce8e6}";

/// Renders the full page, pre-filling `submitted` values.
pub fn render_page(
    schema: &FieldSchema,
    submitted: &HashMap<String, String>,
    outcome: Option<&PageOutcome>,
) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Customer churn prediction</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>Customer churn prediction</h1>\n");

    match outcome {
        Some(PageOutcome::Verdict(verdict)) => html.push_str(&format!(
            "<p class=\"result\">{}</p>\n",
            encode_text(&verdict.summary())
        )),
        Some(PageOutcome::Error(message)) => html.push_str(&format!(
            "<p class=\"error\">Error: {}</p>\n",
            encode_text(message)
        )),
        None => {}
    }

    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    for field in schema.fields() {
        html.push_str(&render_field(field, submitted.get(&field.name).map(String::as_str)));
    }
    html.push_str("<p><button type=\"submit\">Predict</button></p>\n</form>\n</body>\n</html>\n");
    html
}

fn render_field(field: &FieldDefinition, current: Option<&str>) -> String {
    let name = encode_double_quoted_attribute(&field.name);
    let label = format!("<label for=\"{}\">{}</label>\n", name, encode_text(&field.name));

    let input = match &field.kind {
        FieldKind::Choice { .. } => {
            let options: String = field
                .options()
                .unwrap_or_default()
                .iter()
                .map(|option| {
                    let selected = if current == Some(option.as_str()) {
                        " selected"
                    } else {
                        ""
                    };
                    format!(
                        "<option value=\"{}\"{}>{}</option>\n",
                        encode_double_quoted_attribute(option),
                        selected,
                        encode_text(option)
                    )
                })
                .collect();
            format!("<select id=\"{0}\" name=\"{0}\" required>\n{1}</select>\n", name, options)
        }
        FieldKind::IntegerScalar { min_value } => number_input(
            &name,
            "1",
            min_value.map(|m| m.to_string()),
            current,
        ),
        FieldKind::FloatScalar { min_value } => number_input(
            &name,
            "any",
            min_value.map(|m| m.to_string()),
            current,
        ),
    };

    format!("{}{}", label, input)
}

fn number_input(name: &str, step: &str, min: Option<String>, current: Option<&str>) -> String {
    let min_attr = min.map(|m| format!(" min=\"{}\"", m)).unwrap_or_default();
    let value_attr = current
        .map(|v| format!(" value=\"{}\"", encode_double_quoted_attribute(v)))
        .unwrap_or_default();
    format!(
        "<input type=\"number\" id=\"{0}\" name=\"{0}\" step=\"{1}\"{2}{3} required>\n",
        name, step, min_attr, value_attr
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Probability;
    use crate::domain::intake::churn_schema;

    #[test]
    fn page_lists_every_field_in_order() {
        let html = render_page(&churn_schema(), &HashMap::new(), None);

        let senior = html.find("name=\"SeniorCitizen\"").unwrap();
        let contract = html.find("name=\"Contract\"").unwrap();
        let total = html.find("name=\"TotalCharges\"").unwrap();
        assert!(senior < contract && contract < total);
        assert!(html.contains("<option value=\"Bank transfer (automatic)\">"));
        assert!(html.contains("step=\"any\" min=\"0\""));
    }

    #[test]
    fn submitted_values_are_escaped_and_kept() {
        let mut submitted = HashMap::new();
        submitted.insert("tenure".to_string(), "\"><script>".to_string());
        submitted.insert("Contract".to_string(), "One year".to_string());

        let html = render_page(&churn_schema(), &submitted, None);

        assert!(!html.contains("\"><script>"));
        assert!(html.contains("<option value=\"One year\" selected>"));
    }

    #[test]
    fn outcome_is_rendered_above_form() {
        let verdict = Verdict::from_probability(Probability::try_new(75.0).unwrap());
        let html = render_page(&churn_schema(), &HashMap::new(), Some(&PageOutcome::Verdict(verdict)));
        assert!(html.contains("<p class=\"result\">Prediction: LEAVES (75.0% confidence)</p>"));

        let error = PageOutcome::Error("Invalid value for 'x': <b>".to_string());
        let html = render_page(&churn_schema(), &HashMap::new(), Some(&error));
        assert!(html.contains("&lt;b&gt;"));
    }
}
