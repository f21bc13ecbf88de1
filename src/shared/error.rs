//! Shared Error Types
//!
//! Errors raised while handling widget events. None of these ever leave the
//! sync controller: every entry point turns them into a status message.
//!
//! # Error Categories
//!
//! - `HttpStatus` - the page answered with a non-success status
//! - `Transport` - network failure, unreadable body, malformed response
//! - `Timeout` - the optional fetch deadline elapsed
//! - `Host` - the host document API refused or failed a call
//! - `MalformedRecord` - the host supplied a record we cannot read
//!
//! Display strings carry only the bare message so that callers can prefix
//! them (`"Fetch error: "`, `"Error fetching content: "`) without doubling up.
//!
//! # Usage
//!
//! ```rust
//! use gristfetch::shared::error::SyncError;
//!
//! let error = SyncError::transport("network down");
//! assert_eq!(error.to_string(), "network down");
//! ```
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while syncing a record with its URL
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Non-success HTTP response from the page
    #[error("{status_text}")]
    HttpStatus {
        /// Numeric HTTP status
        status: u16,
        /// Reason phrase reported for the status
        status_text: String,
    },

    /// Network or response-level failure
    #[error("{0}")]
    Transport(String),

    /// The fetch did not finish within the configured deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Host document API failure
    #[error("{0}")]
    Host(String),

    /// Record shape not understood
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl SyncError {
    /// Create a new HTTP status error
    pub fn http_status(status: u16, status_text: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            status_text: status_text.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new host error
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }

    /// Create a new malformed-record error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }

    /// Message suitable for the status line, without a leading `"Error: "`
    pub fn display_message(&self) -> String {
        strip_error_prefix(&self.to_string()).to_string()
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Drop one leading `"Error: "` from a message
pub fn strip_error_prefix(message: &str) -> &str {
    message.strip_prefix("Error: ").unwrap_or(message)
}
