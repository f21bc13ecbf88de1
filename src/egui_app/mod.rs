//! egui Native Desktop App Module
//!
//! A desktop stand-in for the widget iframe: a record list on the left, the
//! active record's URL, status line, Fetch button and content preview in the
//! middle.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Main application entry point
//! ├── config.rs   - Config file and environment loading
//! ├── state/      - AppState: wires the sync controller to the UI
//! ├── views/      - Panels (top bar, records, widget)
//! └── theme/      - Colors and frames
//! ```
//!
//! # Example
//!
//! ```text
//! GRIST_DOC_ID=abc GRIST_TABLE_ID=Pages cargo run --bin gristfetch
//! ```

pub mod config;
pub mod state;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
