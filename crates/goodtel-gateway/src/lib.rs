//! goodtel gateway library entry.
//!
//! Wires config, the core estimator, the optional reviewer, request metrics
//! and the HTTP routes into one axum app. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod llm;
pub mod obs;
pub mod ops;
pub mod router;
pub mod showcase;
