use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Record identifier. Posting lists are ascending sequences of these.
pub type DocId = u64;

/// The value type for fields of a source record.
///
/// Text fields are tokenized and indexed through a category's bundles;
/// numeric fields feed location categories, which bucket them into
/// categorical tokens at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// Text content to be tokenized and indexed.
    Text(String),

    /// Numeric content, consumed by location categories.
    Number(f64),
}

impl DataValue {
    /// Returns the text if this is a Text variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value, parsing text if it looks like a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            DataValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::Text(v.to_string())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::Text(v)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Number(v as f64)
    }
}

/// A source record presented to the [`crate::index::writer::IndexWriter`].
///
/// A record is a numeric id plus named fields. Which fields a category
/// reads is decided by the schema (`from` aliases let a category read a
/// field with a different name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique record id within the index.
    pub id: DocId,

    /// Field data.
    pub fields: HashMap<String, DataValue>,
}

impl Record {
    /// Create an empty record with the given id.
    pub fn new(id: DocId) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    /// Add a field to the record.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a reference to a field's value.
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Check if the record has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
