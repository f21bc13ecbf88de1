//! Sync Widget Core
//!
//! The record/URL/content synchronization logic and the collaborators it
//! talks to.
//!
//! # Architecture
//!
//! - **`controller`** - the state machine (`SyncController`)
//! - **`state`** - `SyncState` and its read-only view for the presentation
//! - **`runtime`** - event loop feeding `WidgetEvent`s to the controller
//! - **`host`** - `HostBinding` trait: records, mappings, document updates
//! - **`grist`** - `HostBinding` over the Grist REST API
//! - **`transport`** - `Transport` trait and its reqwest implementation
//! - **`sanitize`** - `Sanitizer` trait and its ammonia implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gristfetch::shared::{event, AppConfig};
//! use gristfetch::widget::{
//!     runtime, ControllerOptions, GristRestHost, HostBinding, HtmlSanitizer, ReqwestTransport,
//!     SyncController,
//! };
//!
//! # async fn example(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let host = Arc::new(GristRestHost::new(config.clone())?);
//! let controller = Arc::new(SyncController::new(
//!     Arc::clone(&host),
//!     ReqwestTransport::default(),
//!     HtmlSanitizer::new(),
//!     ControllerOptions::from_config(&config),
//! ));
//! let (tx, rx) = event::channel();
//! host.on_record_change(tx.clone());
//! tokio::spawn(runtime::run(controller, rx));
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod grist;
pub mod host;
pub mod runtime;
pub mod sanitize;
pub mod state;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use controller::{ControllerOptions, FetchOutcome, FetchTarget, SyncController};
pub use grist::GristRestHost;
pub use host::{AccessLevel, HostBinding, RecordUpdate, WidgetOptions};
pub use sanitize::{HtmlSanitizer, Sanitizer};
pub use state::{StateReader, SyncPhase, SyncState};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
