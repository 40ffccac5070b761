//! Delta value parsing and rendering rules.

/// Rendered delta of two equal values
pub const ZERO_DELTA: &str = "0.00";

/// Parse a field value as a float, ignoring surrounding whitespace
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Rendered delta when either operand is not a number
pub const NAN_DELTA: &str = "nan";

/// Render a numeric delta with two decimal digits
///
/// A `+` prefix is added only when the rounded value is strictly positive.
/// Negative values keep their `-`, including those that round to `-0.00`,
/// which therefore differ from [`ZERO_DELTA`].
pub fn format_delta(delta: f64) -> String {
    if delta.is_nan() {
        return NAN_DELTA.to_string();
    }
    let formatted = format!("{:.2}", delta);
    match formatted.parse::<f64>() {
        Ok(rounded) if rounded > 0.0 => format!("+{}", formatted),
        _ => formatted,
    }
}

/// Delta of a key present only in the `from` input: the raw value with `-`
/// glued on, so `-3` yields `--3`
pub fn prefixed_deleted(value: &str) -> String {
    format!("-{}", value)
}

/// Delta of a key present only in the `to` input: the raw value with `+`
/// glued on
pub fn prefixed_added(value: &str) -> String {
    format!("+{}", value)
}
