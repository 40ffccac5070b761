//! statsdelta core - keyed comparison of two tabular statistics
//!
//! This crate provides:
//! - A keyed record store loaded from delimited text
//! - Output field selection and validation against both inputs
//! - The delta engine classifying each key as changed, not changed,
//!   added or deleted, with per-field old/new/delta values
//! - Deterministic, key-ordered emission of the delta table
//! - Error and logging facilities shared with the command-line front end

pub mod config;
pub mod delta;
pub mod emit;
pub mod errors;
pub mod fields;
pub mod logging_facility;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use config::{CsvDialect, DeltaOptions, DeltaRequest, DuplicateKeyPolicy, EdgeDeltaStyle};
pub use delta::compute_deltas;
pub use emit::emit_deltas;
pub use errors::{DeltaError, ErrorCategory, ExError, ExErrorKind, Result};
pub use fields::resolve_output_fields;
pub use model::{ChangeStatus, DeltaRecord, DeltaSet, DeltaSummary, FieldDelta, Record, Side};
pub use pipeline::run;
pub use store::RecordStore;
