//! Record and Column Mapping Types
//!
//! The host hands records to the widget as plain JSON objects of the form
//! `{"id": 7, "URL": "https://...", "Content": null}`. This module parses those
//! objects into [`Record`] and resolves logical column roles (`URL`, `Content`)
//! to actual column names through a user-configured [`ColumnMapping`].
//!
//! # Truthiness
//!
//! Values coming from the host are JSON, so "is there a URL" follows the host's
//! JavaScript rules: `null`, `false`, `0`, `""` and missing fields are falsy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SyncError;

/// Row identifier inside a host table
pub type RecordId = i64;

/// Logical column holding the page address
pub const URL_COLUMN: &str = "URL";

/// Logical column receiving the fetched HTML
pub const CONTENT_COLUMN: &str = "Content";

/// A single host record: its row id plus every other field by column name
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a record from an id and its fields
    pub fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Parse a raw host record (`{"id": .., <column>: ..}`)
    pub fn from_value(raw: &Value) -> Result<Self, SyncError> {
        let object = record_fields(raw)?;

        let id = object
            .get("id")
            .ok_or_else(|| SyncError::malformed("record has no id"))?
            .as_i64()
            .ok_or_else(|| SyncError::malformed("record id is not an integer"))?;

        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { id, fields })
    }

    /// Look up a field by its actual column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Back to the raw host shape
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert("id".to_string(), Value::from(self.id));
        Value::Object(object)
    }
}

/// Correspondence between the widget's logical columns and a table's real columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// Table the mapped columns belong to
    pub table_id: String,
    /// Logical column name -> actual column id
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Map a logical column to an actual column
    pub fn with_column(mut self, logical: impl Into<String>, actual: impl Into<String>) -> Self {
        self.columns.insert(logical.into(), actual.into());
        self
    }

    /// Actual column for a logical one, if mapped
    pub fn column_for(&self, logical: &str) -> Option<&str> {
        self.columns.get(logical).map(String::as_str)
    }

    /// Re-key a record by logical column names.
    ///
    /// Returns `None` unless every column in `required` is mapped, in which case
    /// callers fall back to the record's raw field names.
    pub fn map_record(&self, record: &Record, required: &[String]) -> Option<Map<String, Value>> {
        self.map_fields(&record.fields, required)
    }

    /// [`ColumnMapping::map_record`] over a raw field map
    pub fn map_fields(&self, fields: &Map<String, Value>, required: &[String]) -> Option<Map<String, Value>> {
        if self.columns.is_empty() {
            return None;
        }
        if !required.iter().all(|logical| self.columns.contains_key(logical)) {
            return None;
        }

        let mapped = self
            .columns
            .iter()
            .map(|(logical, actual)| {
                let value = fields.get(actual).cloned().unwrap_or(Value::Null);
                (logical.clone(), value)
            })
            .collect();
        Some(mapped)
    }
}

/// The field map of a raw host record. Only the shape is checked; `id` may be
/// missing.
pub fn record_fields(raw: &Value) -> Result<&Map<String, Value>, SyncError> {
    raw.as_object()
        .ok_or_else(|| SyncError::malformed(format!("expected an object, got {}", kind_of(raw))))
}

/// URL of a raw record: the mapped `URL` column when every `required` column is
/// mapped, the literal `URL` field otherwise
pub fn resolve_url(
    fields: &Map<String, Value>,
    mapping: Option<&ColumnMapping>,
    required: &[String],
) -> Option<String> {
    let mapped = mapping.and_then(|m| m.map_fields(fields, required));
    let value = match &mapped {
        Some(mapped) => mapped.get(URL_COLUMN),
        None => fields.get(URL_COLUMN),
    };
    url_from_value(value)
}

/// JavaScript truthiness for a host value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extract a usable URL from a host value, or `None` when the value is falsy
pub fn url_from_value(value: Option<&Value>) -> Option<String> {
    let value = value?;
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
