//! Cardinality estimation.
//!
//! The estimator multiplies per-label distinct counts (independence model),
//! which overestimates under label correlation. Label names matching a known
//! unbounded idiom bypass the product entirely and force a `Critical` report
//! with a sentinel series count.
//!
//! Tables (`EstimatorConfig`, `PatternTable`) are built once and shared by
//! reference; nothing here holds mutable state across calls.

pub mod classifier;
pub mod estimator;
pub mod report;
pub mod units;

pub use classifier::{ExtraPattern, Idiom, PatternRule, PatternTable};
pub use estimator::{Estimator, EstimatorConfig};
pub use report::{CardinalityLevel, LabelRisk, RiskReport, RiskTier};
pub use units::human_bytes;
