//! Host Binding
//!
//! What the sync controller needs from the embedding application: lifecycle
//! declaration, the active record and mapping on demand, record-change
//! notifications, and a record update call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::SyncError;
use crate::shared::event::EventSender;
use crate::shared::record::{ColumnMapping, Record, RecordId, CONTENT_COLUMN, URL_COLUMN};

/// Document access a widget asks the host for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "read table")]
    ReadTable,
    #[serde(rename = "full")]
    Full,
}

/// Startup declaration passed to [`HostBinding::ready`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Logical columns the widget reads or writes
    pub columns: Vec<String>,
    pub required_access: AccessLevel,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            columns: vec![URL_COLUMN.to_string(), CONTENT_COLUMN.to_string()],
            required_access: AccessLevel::Full,
        }
    }
}

/// Column-oriented bulk update: `{"id": [..], "fields": {"Col": [..]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: Vec<RecordId>,
    pub fields: BTreeMap<String, Vec<Value>>,
}

impl RecordUpdate {
    /// Update one column of one record
    pub fn single(id: RecordId, column: impl Into<String>, value: Value) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(column.into(), vec![value]);
        Self {
            id: vec![id],
            fields,
        }
    }

    /// Row-oriented form: one `(id, {column: value})` per record
    pub fn rows(&self) -> Vec<(RecordId, serde_json::Map<String, Value>)> {
        self.id
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let row = self
                    .fields
                    .iter()
                    .filter_map(|(column, values)| {
                        values.get(index).map(|value| (column.clone(), value.clone()))
                    })
                    .collect();
                (*id, row)
            })
            .collect()
    }
}

/// Embedding application API used by the sync controller.
/// Implemented by the Grist REST client and by test mocks.
#[async_trait]
pub trait HostBinding: Send + Sync {
    /// Declare needed columns and access level; called once at startup
    async fn ready(&self, options: &WidgetOptions) -> Result<(), SyncError>;

    /// Register where record-change events go
    fn on_record_change(&self, events: EventSender);

    /// Currently active record
    async fn selected_record(&self) -> Result<Record, SyncError>;

    /// Column mapping in effect, `None` when the user configured none
    async fn mappings(&self) -> Result<Option<ColumnMapping>, SyncError>;

    /// Apply a bulk record update to `table_id`
    async fn update_record(&self, table_id: &str, update: RecordUpdate) -> Result<(), SyncError>;
}
