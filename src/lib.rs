//! gristfetch - Fetch a record's URL into its Content column
//!
//! gristfetch is a small companion widget for a Grist document: pick a record
//! that has a `URL` column, press Fetch, and the page at that URL is
//! downloaded, sanitized and written back into the record's `Content` column.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by the controller and the UI
//!   - Records, column mappings, widget events
//!   - Error types and configuration
//!
//! - **`widget`** - The sync controller and its collaborators
//!   - `SyncController` state machine and event loop
//!   - Grist REST host binding, reqwest transport, ammonia sanitizer
//!
//! - **`egui_app`** - Native desktop panel (egui/eframe)
//!   - Record list, status line, Fetch button, content preview
//!
//! # State Machine
//!
//! ```text
//! idle -> fetching -> updating -> done
//! idle -> fetching -> error
//! idle -> no-url
//! ```
//!
//! Status messages are overwritten on every transition. Errors never escape
//! the controller; they end up in the status line.
//!
//! # Thread Safety
//!
//! - The controller state lives in a `tokio::sync::watch` channel with a
//!   single writer (the controller) and any number of readers.
//! - An in-flight flag keeps fetch-and-update sequences from overlapping.
//! - **Native**: egui is single-threaded immediate mode GUI; it reads state
//!   snapshots and sends events.

/// Shared types and data structures
pub mod shared;

/// Sync controller and collaborators
pub mod widget;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
