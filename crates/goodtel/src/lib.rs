//! Top-level facade crate for goodtel.
//!
//! Re-exports the core estimator and the gateway library so users can depend
//! on a single crate.

pub mod core {
    pub use goodtel_core::*;
}

pub mod gateway {
    pub use goodtel_gateway::*;
}

pub use goodtel_core::{evaluate, Evaluation, GoodTelError};
