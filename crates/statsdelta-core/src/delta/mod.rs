//! Delta engine.
//!
//! Aligns two keyed record stores and classifies every key of their union as
//! `changed`, `not changed`, `added` or `deleted`.
//!
//! ## Entry point
//!
//! ```ignore
//! use statsdelta_core::delta::compute_deltas;
//!
//! let deltas = compute_deltas(&from_store, &to_store, &output_fields, &options)?;
//! ```
//!
//! ## Guarantees
//!
//! - **Union coverage**: exactly one record per distinct key of either side.
//! - **Determinism**: the result is a `BTreeMap`, ordered by key bytes.
//! - **Matched keys are numeric**: their deltas are `from - to`, rendered with
//!   two decimals and an explicit `+` for positive values.
//! - **One-sided keys are textual**: by default their deltas are the raw
//!   value with `-` (deleted) or `+` (added) glued on.

pub mod engine;
pub mod format;

pub use engine::compute_deltas;
pub use format::{format_delta, NAN_DELTA, ZERO_DELTA};
