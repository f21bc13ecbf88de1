//! # Sync State
//!
//! The single status/url/content state the controller drives and the
//! presentation observes. It lives in a `tokio::sync::watch` channel: the
//! controller holds the only sender, everybody else gets a [`StateReader`].

use tokio::sync::watch;

use crate::shared::record::RecordId;

pub const STATUS_NO_URL_PROVIDED: &str = "No URL provided.";
pub const STATUS_NO_URL_TO_FETCH: &str = "No URL to fetch.";
pub const STATUS_FETCHING: &str = "Fetching content...";
pub const STATUS_UPDATING: &str = "Content fetched. Updating Grist...";
pub const STATUS_UPDATED: &str = "Content updated successfully.";

/// Where the controller is in its lifecycle; `status` is the human form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// The active record has no usable URL
    NoUrl,
    Fetching,
    /// Page fetched, document update pending
    Updating,
    Done,
    Error,
}

impl SyncPhase {
    /// Whether the phase ended a fetch-and-update sequence
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncPhase::NoUrl | SyncPhase::Done | SyncPhase::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Progress or error message; empty when idle
    pub status: String,
    pub phase: SyncPhase,
    /// URL from the active record, when it has a truthy one
    pub active_url: Option<String>,
    pub active_record_id: Option<RecordId>,
    pub active_table_id: Option<String>,
    /// Sanitized HTML last written to the document
    pub last_fetched_content: Option<String>,
    pub fetch_in_flight: bool,
}

impl SyncState {
    /// Overwrite the status and phase together
    pub(crate) fn transition(&mut self, phase: SyncPhase, status: impl Into<String>) {
        self.phase = phase;
        self.status = status.into();
    }
}

/// Read-only view of the controller's state
#[derive(Debug, Clone)]
pub struct StateReader {
    rx: watch::Receiver<SyncState>,
}

impl StateReader {
    pub(crate) fn new(rx: watch::Receiver<SyncState>) -> Self {
        Self { rx }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SyncState {
        self.rx.borrow().clone()
    }

    /// Current status line
    pub fn status(&self) -> String {
        self.rx.borrow().status.clone()
    }

    /// Wait for the next state change. Returns false once the controller is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until `predicate` holds for the state, returning that state
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<SyncState>
    where
        F: FnMut(&SyncState) -> bool,
    {
        self.rx
            .wait_for(|state| predicate(state))
            .await
            .ok()
            .map(|state| state.clone())
    }
}
