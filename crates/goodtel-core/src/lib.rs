//! goodtel core: exposition decoding and cardinality estimation.
//!
//! This crate turns a blob of exposition-format text into typed samples,
//! aggregates their labels, and estimates how many time series (and how much
//! memory) exposing them would cost. It carries no transport or runtime
//! dependencies so the gateway, tests and tooling can all reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `GoodTelError`; the estimator never fails.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cardinality;
pub mod error;
pub mod exposition;
pub mod pipeline;

/// Shared result type.
pub use error::{GoodTelError, Result};
pub use pipeline::{evaluate, Evaluation};
