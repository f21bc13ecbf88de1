//! Integration tests against a mock HTTP server

pub mod grist_host_test;
pub mod sync_flow_test;
