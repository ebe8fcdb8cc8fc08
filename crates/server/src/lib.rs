//! HTTP server for the book listing aggregation engine.
//!
//! Exposed as a library so integration tests can build an in-process
//! router with mock dependencies injected.

pub mod api;
pub mod metrics;
pub mod state;
