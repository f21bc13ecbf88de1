//! Shared Module
//!
//! Types used by both the sync controller and the presentation: host records
//! and column mappings, the widget event channel, errors and configuration.

/// Host records, column mappings and truthiness rules
pub mod record;

/// Widget event channel
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use record::{ColumnMapping, Record, RecordId, CONTENT_COLUMN, URL_COLUMN};
pub use event::{EventReceiver, EventSender, WidgetEvent};
pub use error::SyncError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
