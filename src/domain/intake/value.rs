//! Raw inputs arriving from front ends and the typed values they become.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate answer as delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum RawInput {
    /// Token of an option the user selected (button press, form select).
    Selection(String),
    /// Text the user typed.
    Text(String),
}

impl RawInput {
    pub fn selection(value: impl Into<String>) -> Self {
        RawInput::Selection(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        RawInput::Text(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            RawInput::Selection(s) | RawInput::Text(s) => s,
        }
    }
}

/// A validated value stored in a session or record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TypedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Float(x) => write!(f, "{}", x),
            TypedValue::Text(s) => write!(f, "{}", s),
        }
    }
}
