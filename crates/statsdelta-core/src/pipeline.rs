//! End-to-end comparison run.
//!
//! Loads both inputs, resolves the output fields, computes the deltas and
//! renders the table. Each stage is logged with the canonical op macros and
//! tags its errors with the stage name.

use crate::config::DeltaRequest;
use crate::delta::compute_deltas;
use crate::emit::emit_deltas;
use crate::errors::{DeltaError, ExError};
use crate::fields::resolve_output_fields;
use crate::model::{DeltaSummary, Side};
use crate::store::RecordStore;
use crate::{log_op_end, log_op_error, log_op_start};
use std::io::Write;
use std::time::Instant;

pub const OP_RUN: &str = "statsdelta_run";
pub const OP_LOAD_STORE: &str = "load_store";
pub const OP_RESOLVE_FIELDS: &str = "resolve_output_fields";
pub const OP_COMPUTE_DELTAS: &str = "compute_deltas";
pub const OP_EMIT_DELTAS: &str = "emit_deltas";

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Run a full comparison and write the delta table to `sink`
///
/// The table is rendered into memory first, so `sink` receives nothing
/// unless every stage succeeded.
///
/// # Errors
///
/// Any error of the individual stages, as an [`ExError`] whose `op` names
/// the failing stage.
pub fn run<W: Write>(request: &DeltaRequest, sink: W) -> Result<DeltaSummary, ExError> {
    let start = Instant::now();
    log_op_start!(OP_RUN, key_field = request.key_field.as_str());

    match run_stages(request, sink) {
        Ok(summary) => {
            log_op_end!(
                OP_RUN,
                duration_ms = elapsed_ms(start),
                row_count = summary.rows as u64
            );
            Ok(summary)
        }
        Err(err) => {
            log_op_error!(OP_RUN, err.clone(), duration_ms = elapsed_ms(start));
            Err(err)
        }
    }
}

fn run_stages<W: Write>(request: &DeltaRequest, mut sink: W) -> Result<DeltaSummary, ExError> {
    let from = load_side(request, Side::From)?;
    let to = load_side(request, Side::To)?;

    let output_fields = resolve_output_fields(
        &request.output_fields,
        from.header(),
        to.header(),
        &request.key_field,
    )
    .map_err(|e| ExError::from(e).with_op(OP_RESOLVE_FIELDS))?;
    tracing::debug!(op = OP_RESOLVE_FIELDS, fields = ?output_fields, "output fields resolved");

    let start = Instant::now();
    log_op_start!(OP_COMPUTE_DELTAS, field_count = output_fields.len() as u64);
    let deltas = match compute_deltas(&from, &to, &output_fields, &request.options) {
        Ok(deltas) => deltas,
        Err(e) => {
            let err = ExError::from(e).with_op(OP_COMPUTE_DELTAS);
            log_op_error!(OP_COMPUTE_DELTAS, err.clone(), duration_ms = elapsed_ms(start));
            return Err(err);
        }
    };
    let summary = DeltaSummary::of(&deltas);
    log_op_end!(
        OP_COMPUTE_DELTAS,
        duration_ms = elapsed_ms(start),
        row_count = summary.rows as u64,
        added = summary.added as u64,
        deleted = summary.deleted as u64,
        changed = summary.changed as u64,
        not_changed = summary.not_changed as u64
    );

    let start = Instant::now();
    log_op_start!(OP_EMIT_DELTAS);
    let mut table = Vec::new();
    let emitted = emit_deltas(&deltas, &request.key_field, &output_fields, &mut table)
        .and_then(|rows| {
            sink.write_all(&table)
                .and_then(|()| sink.flush())
                .map_err(|e| DeltaError::from_io(e, "<output>"))?;
            Ok(rows)
        });
    match emitted {
        Ok(rows) => {
            log_op_end!(
                OP_EMIT_DELTAS,
                duration_ms = elapsed_ms(start),
                row_count = rows as u64
            );
            Ok(summary)
        }
        Err(e) => {
            let err = ExError::from(e).with_op(OP_EMIT_DELTAS);
            log_op_error!(OP_EMIT_DELTAS, err.clone(), duration_ms = elapsed_ms(start));
            Err(err)
        }
    }
}

/// Load one side of the request
///
/// # Errors
///
/// The store's load error tagged with `op = load_store` and the side.
pub fn load_side(request: &DeltaRequest, side: Side) -> Result<RecordStore, ExError> {
    let path = match side {
        Side::From => &request.from,
        Side::To => &request.to,
    };

    let start = Instant::now();
    log_op_start!(
        OP_LOAD_STORE,
        side = side.as_str(),
        source = %path.display()
    );

    match RecordStore::open(
        path,
        &request.key_field,
        &request.dialect,
        request.options.duplicate_keys,
    ) {
        Ok(store) => {
            log_op_end!(
                OP_LOAD_STORE,
                duration_ms = elapsed_ms(start),
                side = side.as_str(),
                row_count = store.rows() as u64,
                key_count = store.len() as u64,
                overwritten = store.overwritten() as u64
            );
            Ok(store)
        }
        Err(e) => {
            let err = ExError::from(e).with_op(OP_LOAD_STORE).with_side(side);
            log_op_error!(
                OP_LOAD_STORE,
                err.clone(),
                duration_ms = elapsed_ms(start),
                side = side.as_str()
            );
            Err(err)
        }
    }
}
