//! Record assembler - turns a session into the record handed to the scorer.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::schema::FieldSchema;
use super::session::IntakeSession;
use super::value::TypedValue;

/// Complete, ordered field-name → value mapping.
///
/// Serializes as a JSON object whose keys follow schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    entries: Vec<(String, TypedValue)>,
}

impl ScoredRecord {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Entries in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for ScoredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds the record for `session`, defaulting every unfilled field.
///
/// Total over any session: a complete session yields exactly its values,
/// a partial one is padded with each field's kind default.
pub fn assemble(schema: &FieldSchema, session: &IntakeSession) -> ScoredRecord {
    let entries = schema
        .fields()
        .map(|field| {
            let value = session
                .value(&field.name)
                .cloned()
                .unwrap_or_else(|| field.default_value());
            (field.name.clone(), value)
        })
        .collect();

    ScoredRecord { entries }
}
