//! Delta computation engine.
//!
//! The entry point is [`compute_deltas`], which aligns two record stores by
//! key and produces one [`DeltaRecord`] per key of their union.

use crate::config::{DeltaOptions, EdgeDeltaStyle};
use crate::delta::format::{
    format_delta, parse_number, prefixed_added, prefixed_deleted, ZERO_DELTA,
};
use crate::errors::{DeltaError, Result};
use crate::model::{ChangeStatus, DeltaRecord, DeltaSet, FieldDelta, Record, Side};
use crate::store::RecordStore;

/// Compare `from` against `to` over `output_fields`
///
/// Keys of `from` are visited first: a key also present in `to` is compared
/// numerically (`from - to` per field), otherwise it is `deleted`. Keys of
/// `to` not seen in the first pass are `added`. Only matched keys parse
/// values as numbers under the default [`EdgeDeltaStyle::Prefixed`].
///
/// # Errors
///
/// - `MissingValue`: a matched row has no value for an output field
/// - `InvalidNumber`: a value that must be numeric does not parse
pub fn compute_deltas(
    from: &RecordStore,
    to: &RecordStore,
    output_fields: &[String],
    options: &DeltaOptions,
) -> Result<DeltaSet> {
    let mut deltas = DeltaSet::new();

    for (key, from_record) in from.iter() {
        let delta = match to.get(key) {
            Some(to_record) => matched_delta(key, from_record, to_record, output_fields)?,
            None => one_sided_delta(
                key,
                Side::From,
                from_record,
                output_fields,
                options.edge_deltas,
            )?,
        };
        deltas.insert(key.to_string(), delta);
    }

    for (key, to_record) in to.iter() {
        if deltas.contains_key(key) {
            continue;
        }
        let delta = one_sided_delta(key, Side::To, to_record, output_fields, options.edge_deltas)?;
        deltas.insert(key.to_string(), delta);
    }

    Ok(deltas)
}

/// Delta of a key present on both sides
fn matched_delta(
    key: &str,
    from_record: &Record,
    to_record: &Record,
    output_fields: &[String],
) -> Result<DeltaRecord> {
    let mut status = ChangeStatus::NotChanged;
    let mut fields = Vec::with_capacity(output_fields.len());

    for field in output_fields {
        let from_value = present_value(from_record, field, key, Side::From)?;
        let to_value = present_value(to_record, field, key, Side::To)?;
        let delta = format_delta(numeric(from_value, field, key)? - numeric(to_value, field, key)?);
        if delta != ZERO_DELTA {
            status = ChangeStatus::Changed;
        }
        fields.push(FieldDelta {
            field: field.clone(),
            from: Some(from_value.to_string()),
            to: Some(to_value.to_string()),
            delta: Some(delta),
        });
    }

    Ok(DeltaRecord {
        key: key.to_string(),
        status,
        fields,
    })
}

/// Delta of a key present on `side` only
fn one_sided_delta(
    key: &str,
    side: Side,
    record: &Record,
    output_fields: &[String],
    style: EdgeDeltaStyle,
) -> Result<DeltaRecord> {
    let mut fields = Vec::with_capacity(output_fields.len());

    for field in output_fields {
        let value = record.get(field);
        let delta = match value {
            None => None,
            Some(value) => Some(edge_delta(value, side, style, field, key)?),
        };
        let value = value.map(str::to_string);
        let (from, to) = match side {
            Side::From => (value, None),
            Side::To => (None, value),
        };
        fields.push(FieldDelta {
            field: field.clone(),
            from,
            to,
            delta,
        });
    }

    let status = match side {
        Side::From => ChangeStatus::Deleted,
        Side::To => ChangeStatus::Added,
    };

    Ok(DeltaRecord {
        key: key.to_string(),
        status,
        fields,
    })
}

fn edge_delta(
    value: &str,
    side: Side,
    style: EdgeDeltaStyle,
    field: &str,
    key: &str,
) -> Result<String> {
    match (style, side) {
        (EdgeDeltaStyle::Prefixed, Side::From) => Ok(prefixed_deleted(value)),
        (EdgeDeltaStyle::Prefixed, Side::To) => Ok(prefixed_added(value)),
        // The absent side counts as zero, so a deleted `0` stays `0.00`.
        (EdgeDeltaStyle::Numeric, Side::From) => {
            Ok(format_delta(0.0 - numeric(value, field, key)?))
        }
        (EdgeDeltaStyle::Numeric, Side::To) => Ok(format_delta(numeric(value, field, key)?)),
    }
}

fn present_value<'r>(record: &'r Record, field: &str, key: &str, side: Side) -> Result<&'r str> {
    record.get(field).ok_or_else(|| DeltaError::MissingValue {
        field: field.to_string(),
        key: key.to_string(),
        side,
    })
}

fn numeric(value: &str, field: &str, key: &str) -> Result<f64> {
    parse_number(value).ok_or_else(|| DeltaError::InvalidNumber {
        field: field.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
