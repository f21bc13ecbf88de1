//! Sync Controller
//!
//! Keeps [`SyncState`] in step with the host's active record and runs the
//! fetch-and-update sequence on demand:
//!
//! ```text
//! idle -> fetching -> updating -> done
//! idle -> fetching -> error
//! idle -> no-url
//! ```
//!
//! No error leaves the controller; every entry point turns failures into the
//! status line. Only one fetch-and-update sequence runs at a time, overlapping
//! requests are rejected with [`FetchOutcome::Busy`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;

use crate::shared::config::AppConfig;
use crate::shared::error::SyncError;
use crate::shared::record::{record_fields, resolve_url, ColumnMapping, RecordId, CONTENT_COLUMN};
use crate::widget::host::{HostBinding, RecordUpdate, WidgetOptions};
use crate::widget::sanitize::Sanitizer;
use crate::widget::state::{
    StateReader, SyncPhase, SyncState, STATUS_FETCHING, STATUS_NO_URL_PROVIDED, STATUS_NO_URL_TO_FETCH,
    STATUS_UPDATED, STATUS_UPDATING,
};
use crate::widget::transport::{HttpResponse, Transport};

/// Controller behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Logical columns a mapping must cover before it is used
    pub required_columns: Vec<String>,
    /// Start a fetch as soon as a record with a URL becomes active
    pub auto_fetch: bool,
    /// Deadline for the GET plus body read
    pub fetch_timeout: Option<Duration>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            required_columns: WidgetOptions::default().columns,
            auto_fetch: false,
            fetch_timeout: None,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            auto_fetch: config.auto_fetch,
            fetch_timeout: config.fetch_timeout(),
            ..Self::default()
        }
    }
}

/// How a fetch request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Content written to the document
    Updated,
    /// Nothing to fetch
    NoUrl,
    /// Another fetch is still running
    Busy,
    /// Failed; the reason is in the status line
    Failed,
}

/// Which page to fetch and where to write it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub url: String,
    pub record_id: RecordId,
    pub table_id: String,
    pub content_column: String,
}

impl FetchTarget {
    pub fn new(url: impl Into<String>, record_id: RecordId, table_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            record_id,
            table_id: table_id.into(),
            content_column: CONTENT_COLUMN.to_string(),
        }
    }

    pub fn with_content_column(mut self, column: impl Into<String>) -> Self {
        self.content_column = column.into();
        self
    }

    fn for_mapping(
        url: String,
        record_id: RecordId,
        table_id: String,
        mapping: Option<&ColumnMapping>,
    ) -> Self {
        let content_column = mapping
            .and_then(|m| m.column_for(CONTENT_COLUMN))
            .unwrap_or(CONTENT_COLUMN);
        Self::new(url, record_id, table_id).with_content_column(content_column)
    }
}

/// Drives the record/URL/content state machine
pub struct SyncController<H: ?Sized, T, S> {
    host: Arc<H>,
    transport: T,
    sanitizer: S,
    options: ControllerOptions,
    state: watch::Sender<SyncState>,
    in_flight: AtomicBool,
}

impl<H, T, S> SyncController<H, T, S>
where
    H: HostBinding + ?Sized,
    T: Transport,
    S: Sanitizer,
{
    pub fn new(host: Arc<H>, transport: T, sanitizer: S, options: ControllerOptions) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self {
            host,
            transport,
            sanitizer,
            options,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Read-only handle on the state
    pub fn subscribe(&self) -> StateReader {
        StateReader::new(self.state.subscribe())
    }

    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Bookkeeping for a new active record. Never touches the network.
    ///
    /// Returns the fetch to run when auto-fetch is enabled and the record has a URL.
    pub fn on_active_record_changed(
        &self,
        record: &Value,
        mapping: Option<&ColumnMapping>,
    ) -> Option<FetchTarget> {
        self.state.send_modify(|state| {
            state.transition(SyncPhase::Idle, "");
            state.last_fetched_content = None;
        });

        let (record_id, url) = match self.resolve_active(record, mapping) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.handle_error(&err);
                self.state.send_modify(clear_identity);
                return None;
            }
        };

        let Some(url) = url else {
            tracing::debug!("Record {:?} has no URL", record_id);
            self.state.send_modify(|state| {
                state.transition(SyncPhase::NoUrl, STATUS_NO_URL_PROVIDED);
                clear_identity(state);
            });
            return None;
        };

        let table_id = mapping.map(|m| m.table_id.clone());
        tracing::debug!("Active record {:?} -> {}", record_id, url);
        self.state.send_modify(|state| {
            state.active_url = Some(url.clone());
            state.active_record_id = record_id;
            state.active_table_id = table_id.clone();
        });

        if !self.options.auto_fetch {
            return None;
        }
        match (record_id, table_id) {
            (Some(record_id), Some(table_id)) => {
                Some(FetchTarget::for_mapping(url, record_id, table_id, mapping))
            }
            _ => {
                tracing::warn!("Auto-fetch skipped: no record or table id for {}", url);
                None
            }
        }
    }

    /// User asked to fetch the active record's URL
    pub async fn on_fetch_requested(&self) -> FetchOutcome {
        let active_url = self.state.borrow().active_url.clone();
        let Some(url) = active_url else {
            self.state
                .send_modify(|state| state.transition(SyncPhase::NoUrl, STATUS_NO_URL_TO_FETCH));
            return FetchOutcome::NoUrl;
        };

        let Some(_guard) = self.begin_fetch() else {
            tracing::warn!("Fetch already in progress, ignoring request for {}", url);
            return FetchOutcome::Busy;
        };

        // The active record may have changed since the last event, so identity
        // is re-read from the host rather than taken from state.
        let target = match self.current_target(url).await {
            Ok(target) => target,
            Err(err) => {
                self.handle_error(&err);
                return FetchOutcome::Failed;
            }
        };

        self.run_sequence(&target).await
    }

    /// Fetch `target.url` and write the sanitized page into the record
    pub async fn fetch_and_update(&self, target: &FetchTarget) -> FetchOutcome {
        let Some(_guard) = self.begin_fetch() else {
            tracing::warn!("Fetch already in progress, ignoring request for {}", target.url);
            return FetchOutcome::Busy;
        };
        self.run_sequence(target).await
    }

    /// Record id (if any) and URL of a raw record. Only the record's shape can
    /// fail; the id is required later, when the host is asked for the record.
    fn resolve_active(
        &self,
        raw: &Value,
        mapping: Option<&ColumnMapping>,
    ) -> Result<(Option<RecordId>, Option<String>), SyncError> {
        let fields = record_fields(raw)?;
        let record_id = fields.get("id").and_then(Value::as_i64);
        let url = resolve_url(fields, mapping, &self.options.required_columns);
        Ok((record_id, url))
    }

    async fn current_target(&self, url: String) -> Result<FetchTarget, SyncError> {
        let record = self.host.selected_record().await?;
        let mapping = self.host.mappings().await?;
        let table_id = match mapping.as_ref() {
            Some(mapping) => mapping.table_id.clone(),
            None => self
                .state
                .borrow()
                .active_table_id
                .clone()
                .ok_or_else(|| SyncError::host("no table id for the selected record"))?,
        };
        Ok(FetchTarget::for_mapping(url, record.id, table_id, mapping.as_ref()))
    }

    async fn run_sequence(&self, target: &FetchTarget) -> FetchOutcome {
        tracing::info!(
            "Fetching {} for record {} in {}",
            target.url,
            target.record_id,
            target.table_id
        );
        self.state
            .send_modify(|state| state.transition(SyncPhase::Fetching, STATUS_FETCHING));

        let response = match self.within_deadline(self.transport.get(&target.url)).await {
            Ok(response) => response,
            Err(err) => return self.fail_fetch(&err),
        };

        if !response.ok() {
            let err = SyncError::http_status(response.status(), response.status_text());
            tracing::warn!("GET {} returned {}", target.url, response.status());
            self.state.send_modify(|state| {
                state.transition(SyncPhase::Error, format!("Error fetching content: {}", err))
            });
            return FetchOutcome::Failed;
        }

        let body = match self.within_deadline(HttpResponse::text(response)).await {
            Ok(body) => body,
            Err(err) => return self.fail_fetch(&err),
        };

        self.state
            .send_modify(|state| state.transition(SyncPhase::Updating, STATUS_UPDATING));

        let sanitized = self.sanitizer.sanitize(&body);
        let update = RecordUpdate::single(
            target.record_id,
            target.content_column.as_str(),
            Value::String(sanitized.clone()),
        );
        if let Err(err) = self.host.update_record(&target.table_id, update).await {
            return self.fail_fetch(&err);
        }

        tracing::info!(
            "Updated {}.{} for record {} ({} bytes)",
            target.table_id,
            target.content_column,
            target.record_id,
            sanitized.len()
        );
        self.state.send_modify(|state| {
            state.transition(SyncPhase::Done, STATUS_UPDATED);
            state.last_fetched_content = Some(sanitized);
        });
        FetchOutcome::Updated
    }

    async fn within_deadline<F, O>(&self, fut: F) -> Result<O, SyncError>
    where
        F: Future<Output = Result<O, SyncError>>,
    {
        match self.options.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| SyncError::Timeout(limit))?,
            None => fut.await,
        }
    }

    fn fail_fetch(&self, err: &SyncError) -> FetchOutcome {
        tracing::error!("Fetch error: {}", err);
        self.state
            .send_modify(|state| state.transition(SyncPhase::Error, format!("Fetch error: {}", err)));
        FetchOutcome::Failed
    }

    fn handle_error(&self, err: &SyncError) {
        tracing::error!("ERROR {}", err);
        let message = err.display_message();
        self.state
            .send_modify(|state| state.transition(SyncPhase::Error, message));
    }

    fn begin_fetch(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.state.send_modify(|state| state.fetch_in_flight = true);
        Some(InFlightGuard {
            flag: &self.in_flight,
            state: &self.state,
        })
    }
}

fn clear_identity(state: &mut SyncState) {
    state.active_url = None;
    state.active_record_id = None;
    state.active_table_id = None;
}

/// Clears the in-flight flag when a sequence ends, however it ends
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<SyncState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.fetch_in_flight = false);
        self.flag.store(false, Ordering::Release);
    }
}
