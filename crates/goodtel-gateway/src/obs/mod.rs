//! Lightweight in-process metrics.
//!
//! Stored as atomics and rendered by the `/metrics` handler; the output is
//! itself valid input for the core decoder.

pub mod metrics;

pub use metrics::GatewayMetrics;
