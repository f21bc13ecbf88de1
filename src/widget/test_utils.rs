//! Mocks for the host binding and transport, shared by the widget tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::shared::error::SyncError;
use crate::shared::event::{EventSender, WidgetEvent};
use crate::shared::record::{ColumnMapping, Record};
use crate::widget::host::{HostBinding, RecordUpdate, WidgetOptions};
use crate::widget::transport::{HttpResponse, Transport};

pub type Recorded<T> = Arc<Mutex<Vec<T>>>;

/// Scripted transport reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Page(u16, String),
    Fail(String),
    /// Status arrives, the body read fails
    BrokenBody(u16, String),
}

impl MockReply {
    pub fn page(status: u16, body: &str) -> Self {
        Self::Page(status, body.to_string())
    }

    pub fn fail(message: &str) -> Self {
        Self::Fail(message.to_string())
    }

    pub fn broken_body(status: u16, message: &str) -> Self {
        Self::BrokenBody(status, message.to_string())
    }
}

/// Transport answering from a script of replies; unscripted calls get an empty 200
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Recorded<String>,
    gate: Option<Arc<Semaphore>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn reply(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Hold every GET until a permit is added to [`MockTransport::gate`]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn gate(&self) -> Arc<Semaphore> {
        self.gate.clone().expect("transport is not gated")
    }

    pub fn calls(&self) -> Recorded<String> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Page(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(MockReply::Fail(message)) => Err(SyncError::transport(message)),
            Some(MockReply::BrokenBody(status, message)) => {
                Ok(HttpResponse::unreadable(status, SyncError::transport(message)))
            }
            None => Ok(HttpResponse::new(200, "")),
        }
    }
}

/// In-memory host recording every update
pub struct MockHost {
    selected: Mutex<Option<Value>>,
    mapping: Mutex<Option<ColumnMapping>>,
    updates: Recorded<(String, RecordUpdate)>,
    update_error: Option<String>,
    update_gate: Option<Arc<Semaphore>>,
    events: Mutex<Option<EventSender>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            selected: Mutex::new(None),
            mapping: Mutex::new(None),
            updates: Arc::new(Mutex::new(Vec::new())),
            update_error: None,
            update_gate: None,
            events: Mutex::new(None),
        }
    }

    pub fn with_selected(self, record: Value) -> Self {
        *self.selected.lock().unwrap() = Some(record);
        self
    }

    pub fn with_mapping(self, mapping: ColumnMapping) -> Self {
        *self.mapping.lock().unwrap() = Some(mapping);
        self
    }

    pub fn failing_updates(mut self, message: &str) -> Self {
        self.update_error = Some(message.to_string());
        self
    }

    /// Hold every update until a permit is added to [`MockHost::update_gate`]
    pub fn gated_updates(mut self) -> Self {
        self.update_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn update_gate(&self) -> Arc<Semaphore> {
        self.update_gate.clone().expect("updates are not gated")
    }

    pub fn updates(&self) -> Recorded<(String, RecordUpdate)> {
        Arc::clone(&self.updates)
    }

    /// Change the selection and notify like a real host would
    pub fn select(&self, record: Value) {
        *self.selected.lock().unwrap() = Some(record.clone());
        let mapping = self.mapping.lock().unwrap().clone();
        if let Some(events) = self.events.lock().unwrap().as_ref() {
            let _ = events.send(WidgetEvent::record_changed(record, mapping));
        }
    }
}

#[async_trait]
impl HostBinding for MockHost {
    async fn ready(&self, _options: &WidgetOptions) -> Result<(), SyncError> {
        Ok(())
    }

    fn on_record_change(&self, events: EventSender) {
        *self.events.lock().unwrap() = Some(events);
    }

    async fn selected_record(&self) -> Result<Record, SyncError> {
        let selected = self.selected.lock().unwrap().clone();
        match selected {
            Some(raw) => Record::from_value(&raw),
            None => Err(SyncError::host("no record selected")),
        }
    }

    async fn mappings(&self) -> Result<Option<ColumnMapping>, SyncError> {
        Ok(self.mapping.lock().unwrap().clone())
    }

    async fn update_record(&self, table_id: &str, update: RecordUpdate) -> Result<(), SyncError> {
        if let Some(gate) = &self.update_gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if let Some(message) = &self.update_error {
            return Err(SyncError::host(message.clone()));
        }
        self.updates.lock().unwrap().push((table_id.to_string(), update));
        Ok(())
    }
}
