/**
 * Grist REST Host Binding
 *
 * Implements [`HostBinding`] on top of the Grist document REST API:
 *
 * - `GET   /api/docs/{doc}/tables/{table}/columns`  (ready check)
 * - `GET   /api/docs/{doc}/tables/{table}/records`  (record list)
 * - `PATCH /api/docs/{doc}/tables/{table}/records`  (content update)
 *
 * The selection lives here: the presentation calls [`GristRestHost::select`]
 * and the host emits a record-changed event, as the embedding page would.
 */
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::config::AppConfig;
use crate::shared::error::SyncError;
use crate::shared::event::{EventSender, WidgetEvent};
use crate::shared::record::{ColumnMapping, Record, RecordId};
use crate::widget::host::{AccessLevel, HostBinding, RecordUpdate, WidgetOptions};

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<RestRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RestRecord {
    id: RecordId,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct RecordsPatch {
    records: Vec<RestRecord>,
}

#[derive(Debug, Deserialize)]
struct ColumnsResponse {
    columns: Vec<RestColumn>,
}

#[derive(Debug, Deserialize)]
struct RestColumn {
    id: String,
}

/// Host binding backed by a Grist document
pub struct GristRestHost {
    config: AppConfig,
    client: Client,
    selected: Mutex<Option<Value>>,
    events: Mutex<Option<EventSender>>,
}

impl GristRestHost {
    /// Create a host for the configured document and table
    pub fn new(config: AppConfig) -> Result<Self, SyncError> {
        config
            .validate()
            .map_err(|err| SyncError::host(err.to_string()))?;
        Ok(Self {
            config,
            client: Client::new(),
            selected: Mutex::new(None),
            events: Mutex::new(None),
        })
    }

    pub fn table_id(&self) -> &str {
        self.config.table_id.as_deref().unwrap_or_default()
    }

    pub fn doc_id(&self) -> &str {
        self.config.doc_id.as_deref().unwrap_or_default()
    }

    /// Records of the configured table, in the plugin shape `{"id", ...fields}`
    pub async fn list_records(&self) -> Result<Vec<Value>, SyncError> {
        let url = self.table_url(self.table_id(), "records");
        let response = self.send(self.client.get(&url)).await?;
        let body: RecordsResponse = response
            .json()
            .await
            .map_err(|e| SyncError::host(format!("Failed to parse records: {}", e)))?;

        Ok(body
            .records
            .into_iter()
            .map(|rest| Record::new(rest.id, rest.fields).to_value())
            .collect())
    }

    /// Make `record` the active record and notify listeners
    pub fn select(&self, record: Value) {
        *self.selected.lock().unwrap_or_else(|e| e.into_inner()) = Some(record.clone());

        let events = self.events.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match events {
            Some(events) => {
                if events
                    .send(WidgetEvent::record_changed(record, self.config.column_mapping()))
                    .is_err()
                {
                    tracing::warn!("Record selected but the sync controller is gone");
                }
            }
            None => tracing::debug!("Record selected before anyone listened"),
        }
    }

    fn table_url(&self, table_id: &str, leaf: &str) -> String {
        self.config.api_url(&format!("/tables/{}/{}", table_id, leaf))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SyncError> {
        let request = match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::host(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SyncError::host(format!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                error_text.trim()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl HostBinding for GristRestHost {
    async fn ready(&self, options: &WidgetOptions) -> Result<(), SyncError> {
        if options.required_access == AccessLevel::Full && self.config.api_key.is_none() {
            tracing::warn!("Full document access requested without an API key");
        }

        let url = self.table_url(self.table_id(), "columns");
        let response = self.send(self.client.get(&url)).await?;
        let body: ColumnsResponse = response
            .json()
            .await
            .map_err(|e| SyncError::host(format!("Failed to parse columns: {}", e)))?;

        for logical in &options.columns {
            let actual = self
                .config
                .columns
                .get(logical)
                .map(String::as_str)
                .unwrap_or(logical.as_str());
            if !body.columns.iter().any(|column| column.id == actual) {
                return Err(SyncError::host(format!(
                    "column {} not found in table {}",
                    actual,
                    self.table_id()
                )));
            }
        }

        tracing::info!(
            "Widget ready on {}/{} (columns: {})",
            self.doc_id(),
            self.table_id(),
            options.columns.join(", ")
        );
        Ok(())
    }

    fn on_record_change(&self, events: EventSender) {
        *self.events.lock().unwrap_or_else(|e| e.into_inner()) = Some(events);
    }

    async fn selected_record(&self) -> Result<Record, SyncError> {
        let selected = self.selected.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match selected {
            Some(raw) => Record::from_value(&raw),
            None => Err(SyncError::host("no record selected")),
        }
    }

    async fn mappings(&self) -> Result<Option<ColumnMapping>, SyncError> {
        Ok(self.config.column_mapping())
    }

    async fn update_record(&self, table_id: &str, update: RecordUpdate) -> Result<(), SyncError> {
        let patch = RecordsPatch {
            records: update
                .rows()
                .into_iter()
                .map(|(id, fields)| RestRecord { id, fields })
                .collect(),
        };
        let url = self.table_url(table_id, "records");
        self.send(self.client.patch(&url).json(&patch)).await?;
        tracing::debug!("Patched {} record(s) in {}", patch.records.len(), table_id);
        Ok(())
    }
}
