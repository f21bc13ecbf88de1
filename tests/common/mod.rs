//! Common test utilities and helpers
//!
//! - Custom assertion macros
//! - A wiremock stand-in for the Grist document API

pub mod assertions;

pub use grist_server::*;
