use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::egui_app::Config;
use crate::shared::error::SyncError;
use crate::shared::event::{self, EventSender, WidgetEvent};
use crate::shared::record::{record_fields, resolve_url, ColumnMapping, RecordId};
use crate::shared::ConfigError;
use crate::widget::runtime::run as run_sync_loop;
use crate::widget::{
    ControllerOptions, GristRestHost, HostBinding, HtmlSanitizer, ReqwestTransport, StateReader,
    SyncController, SyncState, WidgetOptions,
};

/// Central application state shared across egui views.
pub struct AppState {
    runtime: Runtime,
    pub config: Option<Config>,
    host: Option<Arc<GristRestHost>>,
    events: Option<EventSender>,
    reader: Option<StateReader>,
    mapping: Option<ColumnMapping>,

    pub records: Vec<Value>,
    pub selected_id: Option<RecordId>,
    pub records_loading: bool,
    records_result: Option<Receiver<Result<Vec<Value>, SyncError>>>,
    ready_result: Option<Receiver<Result<(), SyncError>>>,

    /// Startup/config problem shown in the red banner
    pub error: Option<String>,
}

impl AppState {
    pub fn new(runtime: Runtime, config: Result<Config, ConfigError>) -> Self {
        let mut state = Self {
            runtime,
            config: None,
            host: None,
            events: None,
            reader: None,
            mapping: None,
            records: Vec::new(),
            selected_id: None,
            records_loading: false,
            records_result: None,
            ready_result: None,
            error: None,
        };

        match config {
            Ok(config) => state.connect(config),
            Err(e) => {
                tracing::error!("Configuration error: {}", e);
                state.error = Some(format!("Configuration error: {}", e));
            }
        }
        state
    }

    fn connect(&mut self, config: Config) {
        let app = config.app().clone();
        self.config = Some(config);

        let host = match GristRestHost::new(app.clone()) {
            Ok(host) => Arc::new(host),
            Err(e) => {
                self.error = Some(e.display_message());
                return;
            }
        };

        let transport = match app.fetch_timeout() {
            Some(limit) => match ReqwestTransport::with_timeout(limit) {
                Ok(transport) => transport,
                Err(e) => {
                    self.error = Some(e.display_message());
                    return;
                }
            },
            None => ReqwestTransport::default(),
        };
        let sanitizer = HtmlSanitizer::with_allowances(&app.allowed_tags, &app.allowed_attributes);

        let controller = Arc::new(SyncController::new(
            Arc::clone(&host),
            transport,
            sanitizer,
            ControllerOptions::from_config(&app),
        ));
        let (tx, rx) = event::channel();
        host.on_record_change(tx.clone());

        self.reader = Some(controller.subscribe());
        self.runtime.spawn(run_sync_loop(controller, rx));
        self.events = Some(tx);
        self.mapping = app.column_mapping();

        let (ready_tx, ready_rx) = channel();
        let ready_host = Arc::clone(&host);
        self.runtime.spawn(async move {
            let result = ready_host.ready(&WidgetOptions::default()).await;
            let _ = ready_tx.send(result);
        });
        self.ready_result = Some(ready_rx);

        self.host = Some(host);
        self.refresh_records();
    }

    /// Pick up results from background tasks; called once per frame
    pub fn poll_background(&mut self) {
        if let Some(ref rx) = self.ready_result {
            if let Ok(result) = rx.try_recv() {
                self.ready_result = None;
                if let Err(e) = result {
                    tracing::error!("Widget not ready: {}", e);
                    self.error = Some(e.display_message());
                }
            }
        }

        if let Some(ref rx) = self.records_result {
            if let Ok(result) = rx.try_recv() {
                self.records_result = None;
                self.records_loading = false;
                match result {
                    Ok(records) => {
                        tracing::debug!("Loaded {} records", records.len());
                        self.records = records;
                    }
                    Err(e) => {
                        tracing::error!("Failed to load records: {}", e);
                        self.error = Some(e.display_message());
                    }
                }
            }
        }
    }

    /// Reload the table's records in the background
    pub fn refresh_records(&mut self) {
        let Some(host) = self.host.clone() else {
            return;
        };
        self.records_loading = true;

        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(host.list_records().await);
        });
        self.records_result = Some(rx);
    }

    /// Make `record` the host's active record
    pub fn select_record(&mut self, record: &Value) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        self.selected_id = record.get("id").and_then(Value::as_i64);
        host.select(record.clone());
    }

    /// Forward the Fetch button to the controller
    pub fn request_fetch(&self) {
        if let Some(events) = &self.events {
            if events.send(WidgetEvent::FetchRequested).is_err() {
                tracing::warn!("Fetch requested but the sync loop has stopped");
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.events.is_some()
    }

    pub fn sync_state(&self) -> SyncState {
        self.reader
            .as_ref()
            .map(StateReader::snapshot)
            .unwrap_or_default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// `doc / table` for the top bar
    pub fn location(&self) -> Option<String> {
        let host = self.host.as_ref()?;
        Some(format!("{} / {}", host.doc_id(), host.table_id()))
    }

    /// URL shown for a record in the list, resolved like the controller does
    pub fn record_url(&self, raw: &Value) -> Option<String> {
        let fields = record_fields(raw).ok()?;
        resolve_url(fields, self.mapping.as_ref(), &WidgetOptions::default().columns)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(events) = self.events.take() {
            let _ = events.send(WidgetEvent::Shutdown);
        }
    }
}
