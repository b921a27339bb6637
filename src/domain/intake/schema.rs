//! Field schema - the static description of every collected attribute.
//!
//! The schema is the single source of truth for the intake flow: adding or
//! removing a field means editing the field list here and nothing else.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::value::TypedValue;

/// Errors raised when a field list cannot form a valid schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Duplicate field name: {0}")]
    DuplicateName(String),

    #[error("Field orders must be contiguous from 0: expected {expected}, found {found} ({name})")]
    NonContiguousOrder {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Choice field '{0}' has no legal values")]
    EmptyChoice(String),
}

/// One member of a choice field's legal set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum LegalValue {
    Text(String),
    Integer(i64),
}

impl LegalValue {
    /// The typed value stored when this member is selected.
    pub fn to_typed(&self) -> TypedValue {
        match self {
            LegalValue::Text(s) => TypedValue::Text(s.clone()),
            LegalValue::Integer(i) => TypedValue::Integer(*i),
        }
    }
}

impl fmt::Display for LegalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalValue::Text(s) => write!(f, "{}", s),
            LegalValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for LegalValue {
    fn from(s: &str) -> Self {
        LegalValue::Text(s.to_string())
    }
}

impl From<i64> for LegalValue {
    fn from(i: i64) -> Self {
        LegalValue::Integer(i)
    }
}

/// Kind of a field together with its constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Choice { legal_values: Vec<LegalValue> },
    IntegerScalar { min_value: Option<i64> },
    FloatScalar { min_value: Option<f64> },
}

/// Static description of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub order: usize,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn choice<V: Into<LegalValue>>(
        name: impl Into<String>,
        order: usize,
        legal_values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            kind: FieldKind::Choice {
                legal_values: legal_values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn integer(name: impl Into<String>, order: usize, min_value: Option<i64>) -> Self {
        Self {
            name: name.into(),
            order,
            kind: FieldKind::IntegerScalar { min_value },
        }
    }

    pub fn float(name: impl Into<String>, order: usize, min_value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            order,
            kind: FieldKind::FloatScalar { min_value },
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    /// Selectable options in display form, or `None` for free-text fields.
    pub fn options(&self) -> Option<Vec<String>> {
        match &self.kind {
            FieldKind::Choice { legal_values } => {
                Some(legal_values.iter().map(ToString::to_string).collect())
            }
            _ => None,
        }
    }

    /// Value used by the record assembler when the session has none.
    ///
    /// Integer scalars default to `0`, float scalars to `0.0`, text choices
    /// to `"No"`. A choice whose members are integers defaults to `0`.
    pub fn default_value(&self) -> TypedValue {
        match &self.kind {
            FieldKind::Choice { legal_values } => {
                if legal_values
                    .iter()
                    .all(|v| matches!(v, LegalValue::Integer(_)))
                {
                    TypedValue::Integer(0)
                } else {
                    TypedValue::Text("No".to_string())
                }
            }
            FieldKind::IntegerScalar { .. } => TypedValue::Integer(0),
            FieldKind::FloatScalar { .. } => TypedValue::Float(0.0),
        }
    }
}

/// Ordered, validated collection of field definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
}

impl FieldSchema {
    /// Builds a schema, enforcing unique names and orders contiguous from 0.
    ///
    /// Input order does not matter; fields are sorted by `order`.
    pub fn new(mut fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        fields.sort_by_key(|f| f.order);

        let mut seen = HashSet::new();
        for (expected, field) in fields.iter().enumerate() {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName(field.name.clone()));
            }
            if field.order != expected {
                return Err(SchemaError::NonContiguousOrder {
                    name: field.name.clone(),
                    expected,
                    found: field.order,
                });
            }
            if let FieldKind::Choice { legal_values } = &field.kind {
                if legal_values.is_empty() {
                    return Err(SchemaError::EmptyChoice(field.name.clone()));
                }
            }
        }

        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in collection order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn by_order(&self, order: usize) -> Option<&FieldDefinition> {
        self.fields.get(order)
    }

    pub fn by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Order of the first field, or `None` for an empty schema.
    pub fn first_order(&self) -> Option<usize> {
        (!self.fields.is_empty()).then_some(0)
    }

    /// Order that follows `order`, or `None` after the last field.
    pub fn next_order(&self, order: usize) -> Option<usize> {
        let next = order + 1;
        (next < self.fields.len()).then_some(next)
    }
}

const YES_NO: [&str; 2] = ["Yes", "No"];
const INTERNET_ADDON: [&str; 3] = ["Yes", "No", "No internet service"];

static CHURN_SCHEMA: Lazy<Arc<FieldSchema>> = Lazy::new(|| {
    let fields = vec![
        FieldDefinition::choice("SeniorCitizen", 0, [0_i64, 1]),
        FieldDefinition::choice("Partner", 1, YES_NO),
        FieldDefinition::choice("Dependents", 2, YES_NO),
        FieldDefinition::choice("PhoneService", 3, YES_NO),
        FieldDefinition::choice("MultipleLines", 4, ["Yes", "No", "No phone service"]),
        FieldDefinition::choice("InternetService", 5, ["Fiber optic", "DSL", "No"]),
        FieldDefinition::choice("OnlineSecurity", 6, INTERNET_ADDON),
        FieldDefinition::choice("OnlineBackup", 7, INTERNET_ADDON),
        FieldDefinition::choice("DeviceProtection", 8, INTERNET_ADDON),
        FieldDefinition::choice("TechSupport", 9, INTERNET_ADDON),
        FieldDefinition::choice("StreamingTV", 10, INTERNET_ADDON),
        FieldDefinition::choice("StreamingMovies", 11, INTERNET_ADDON),
        FieldDefinition::choice("Contract", 12, ["Month-to-month", "One year", "Two year"]),
        FieldDefinition::choice("PaperlessBilling", 13, YES_NO),
        FieldDefinition::choice(
            "PaymentMethod",
            14,
            [
                "Electronic check",
                "Mailed check",
                "Bank transfer (automatic)",
                "Credit card (automatic)",
            ],
        ),
        FieldDefinition::integer("tenure", 15, Some(0)),
        FieldDefinition::float("MonthlyCharges", 16, Some(0.0)),
        FieldDefinition::float("TotalCharges", 17, Some(0.0)),
    ];
    Arc::new(FieldSchema::new(fields).expect("churn field set is well-formed"))
});

/// The customer-attribute schema consumed by the churn scorer.
pub fn churn_schema() -> Arc<FieldSchema> {
    Arc::clone(&CHURN_SCHEMA)
}
