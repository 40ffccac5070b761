//! Delta table emission.
//!
//! Writes a [`DeltaSet`] as comma-delimited text: quoting only where needed,
//! embedded quotes doubled, `\n` line endings, absent values as empty fields.

use crate::errors::{DeltaError, Result};
use crate::model::DeltaSet;
use std::io::Write;

/// Header of the change-status column
pub const STATUS_COLUMN: &str = "diff status";

/// Name used for the output sink in errors
const SINK_NAME: &str = "<output>";

/// Output header: key, status, then `from_`/`to_`/`delta_` per output field
pub fn delta_header(key_field: &str, output_fields: &[String]) -> Vec<String> {
    let mut header = Vec::with_capacity(2 + output_fields.len() * 3);
    header.push(key_field.to_string());
    header.push(STATUS_COLUMN.to_string());
    for field in output_fields {
        header.push(format!("from_{}", field));
        header.push(format!("to_{}", field));
        header.push(format!("delta_{}", field));
    }
    header
}

/// Write the header and one row per delta record, in key order
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// `Io` when the sink rejects a write or flush.
pub fn emit_deltas<W: Write>(
    deltas: &DeltaSet,
    key_field: &str,
    output_fields: &[String],
    sink: W,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer
        .write_record(delta_header(key_field, output_fields))
        .map_err(|e| DeltaError::from_csv(e, SINK_NAME))?;

    for record in deltas.values() {
        let mut row: Vec<&str> = Vec::with_capacity(2 + record.fields.len() * 3);
        row.push(&record.key);
        row.push(record.status.as_str());
        for field in &record.fields {
            row.push(field.from.as_deref().unwrap_or_default());
            row.push(field.to.as_deref().unwrap_or_default());
            row.push(field.delta.as_deref().unwrap_or_default());
        }
        writer
            .write_record(&row)
            .map_err(|e| DeltaError::from_csv(e, SINK_NAME))?;
    }

    writer
        .flush()
        .map_err(|e| DeltaError::from_io(e, SINK_NAME))?;
    Ok(deltas.len())
}
