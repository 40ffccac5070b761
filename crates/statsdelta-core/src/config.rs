//! Per-invocation configuration objects.
//!
//! Everything the comparison needs is passed explicitly through these types;
//! there is no process-wide dialect or option registry.

use crate::errors::{DeltaError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Token accepted in place of a literal tab character
pub const TAB_TOKEN: &str = "TAB";

/// Quote character used for every input, whatever the delimiter
pub const QUOTE_CHAR: u8 = b'"';

/// Delimited-text dialect of the two inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    delimiter: u8,
    quote: u8,
}

impl CsvDialect {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            quote: QUOTE_CHAR,
        }
    }

    /// Parse a delimiter argument: a single ASCII character or `TAB`
    pub fn from_delimiter_arg(arg: &str) -> Result<Self> {
        if arg == TAB_TOKEN {
            return Ok(Self::new(b'\t'));
        }
        match arg.as_bytes() {
            [byte] if byte.is_ascii() => Ok(Self::new(*byte)),
            _ => Err(DeltaError::InvalidDelimiter {
                value: arg.to_string(),
            }),
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn quote(&self) -> u8 {
        self.quote
    }

    /// Reader configured for this dialect, with a header row
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(true)
            .has_headers(true)
            .flexible(true);
        builder
    }
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self::new(b',')
    }
}

/// What to do when one input repeats a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The later row silently replaces the earlier one
    #[default]
    LastWriteWins,
    /// A repeated key is a data-format error
    Reject,
}

/// How deltas are rendered for keys present on one side only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDeltaStyle {
    /// `-` / `+` glued onto the raw value; `-5` becomes `--5` when deleted
    #[default]
    Prefixed,
    /// The value parsed as a number, negated for deleted keys, and formatted
    /// like a matched-row delta
    Numeric,
}

/// Options steering the comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaOptions {
    pub edge_deltas: EdgeDeltaStyle,
    pub duplicate_keys: DuplicateKeyPolicy,
}

/// A complete comparison request
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRequest {
    pub from: PathBuf,
    pub to: PathBuf,
    pub key_field: String,
    pub dialect: CsvDialect,
    /// Explicit output fields; empty means "derive from the from header"
    pub output_fields: Vec<String>,
    pub options: DeltaOptions,
}

impl DeltaRequest {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, key_field: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            key_field: key_field.into(),
            dialect: CsvDialect::default(),
            output_fields: Vec::new(),
            options: DeltaOptions::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: CsvDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_output_fields(mut self, fields: Vec<String>) -> Self {
        self.output_fields = fields;
        self
    }

    pub fn with_options(mut self, options: DeltaOptions) -> Self {
        self.options = options;
        self
    }
}
