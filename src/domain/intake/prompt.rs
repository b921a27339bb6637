//! Prompt rendering for the next awaited field.

use serde::Serialize;

use super::schema::{FieldDefinition, FieldKind};
use super::session::IntakeSession;

/// Everything a front end needs to ask for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSpec {
    pub field: String,
    pub order: usize,
    pub total: usize,
    /// Selectable options; `None` means free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub hint: String,
}

impl PromptSpec {
    pub fn for_field(field: &FieldDefinition, total: usize) -> Self {
        Self {
            field: field.name.clone(),
            order: field.order,
            total,
            options: field.options(),
            hint: hint_for(&field.kind),
        }
    }

    /// One-line question, e.g. `(13/18) Contract: choose one option`.
    pub fn question(&self) -> String {
        format!("({}/{}) {}: {}", self.order + 1, self.total, self.field, self.hint)
    }
}

fn hint_for(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Choice { .. } => "choose one option".to_string(),
        FieldKind::IntegerScalar { min_value } => match min_value {
            Some(min) => format!("enter a whole number, at least {}", min),
            None => "enter a whole number".to_string(),
        },
        FieldKind::FloatScalar { min_value } => match min_value {
            Some(min) => format!("enter a number, at least {}", min),
            None => "enter a number".to_string(),
        },
    }
}

/// Summary of answers given so far, one `field: value` per line.
pub fn render_status(session: &IntakeSession) -> String {
    let mut lines = vec!["Your answers so far:".to_string()];
    lines.extend(
        session
            .values()
            .iter()
            .map(|v| format!("{}: {}", v.field, v.value)),
    );
    lines.join("\n")
}

/// Status summary followed by the question, as shown in chat transports.
pub fn render_prompt(session: &IntakeSession, prompt: &PromptSpec) -> String {
    format!("{}\n\n{}", render_status(session), prompt.question())
}
