//! Exposition text handling (line decoding + label aggregation).
//!
//! - `sample`: two-case line recognizer and sample decoder.
//! - `labels`: quote-aware `key="value"` list scanner.
//! - `index`: label name -> distinct values inverted index.
//!
//! All parsers are panic-free: malformed lines are reported as
//! `GoodTelError` with the 1-based line number instead of panicking or
//! indexing raw strings.

pub mod index;
pub mod labels;
pub mod sample;

pub use index::LabelIndex;
pub use sample::{decode_line, recognize, LineForm, Sample, DEFAULT_VALUE};
