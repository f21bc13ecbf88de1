/**
 * Widget Event System
 *
 * The host used to call back into the widget; here it emits events on a
 * channel instead and the sync controller's event loop consumes them.
 */
use serde_json::Value;
use tokio::sync::mpsc;

use crate::shared::record::ColumnMapping;

/// Inbound event for the sync controller
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The host's active record changed
    RecordChanged {
        /// Raw record as supplied by the host
        record: Value,
        /// Column mapping in effect, if the user configured one
        mapping: Option<ColumnMapping>,
    },
    /// The user asked for the active record's URL to be fetched
    FetchRequested,
    /// Stop consuming events
    Shutdown,
}

impl WidgetEvent {
    /// Create a record-changed event
    pub fn record_changed(record: Value, mapping: Option<ColumnMapping>) -> Self {
        Self::RecordChanged { record, mapping }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetEvent::RecordChanged { .. } => "record_changed",
            WidgetEvent::FetchRequested => "fetch_requested",
            WidgetEvent::Shutdown => "shutdown",
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<WidgetEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<WidgetEvent>;

/// Create the event channel between host/presentation and the controller
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
