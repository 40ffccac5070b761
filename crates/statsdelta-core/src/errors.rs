use crate::model::Side;
use thiserror::Error;

/// Result type alias using DeltaError
pub type Result<T> = std::result::Result<T, DeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and tests, and to one of the three failure categories the CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidDelimiter,
    OutputFieldMissing,

    // Data format
    MissingKeyField,
    MissingValue,
    InvalidNumber,
    DuplicateKey,
    Csv,

    // Integration/IO
    Io,
}

/// Failure category of an error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad invocation; detected before any comparison starts
    Configuration,
    /// Malformed input the comparison cannot safely interpret
    DataFormat,
    /// Source or sink could not be read or written
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidDelimiter => "ERR_INVALID_DELIMITER",
            ExErrorKind::OutputFieldMissing => "ERR_OUTPUT_FIELD_MISSING",
            ExErrorKind::MissingKeyField => "ERR_MISSING_KEY_FIELD",
            ExErrorKind::MissingValue => "ERR_MISSING_VALUE",
            ExErrorKind::InvalidNumber => "ERR_INVALID_NUMBER",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::Csv => "ERR_CSV",
            ExErrorKind::Io => "ERR_IO",
        }
    }

    /// Get the failure category for this kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExErrorKind::InvalidDelimiter | ExErrorKind::OutputFieldMissing => {
                ErrorCategory::Configuration
            }
            ExErrorKind::MissingKeyField
            | ExErrorKind::MissingValue
            | ExErrorKind::InvalidNumber
            | ExErrorKind::DuplicateKey
            | ExErrorKind::Csv => ErrorCategory::DataFormat,
            ExErrorKind::Io => ErrorCategory::Io,
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context was known where the
/// error surfaced: operation, input side, key, field, line and source name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<Side>,
    key: Option<String>,
    field: Option<String>,
    line: Option<u64>,
    source_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            key: None,
            field: None,
            line: None,
            source_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add input side context
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Add record key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add 1-based input line context
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Add source (path or stream name) context
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(source_name) = &self.source_name {
            write!(f, " (source: {})", source_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for loading, comparing and emitting delta tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    // ===== Configuration Errors =====
    /// Delimiter argument is not a single character (or the TAB token)
    #[error("Invalid delimiter {value:?}: expected a single character or TAB")]
    InvalidDelimiter { value: String },

    /// Output fields absent from one side's header
    #[error("Output fields {fields:?} are not part of the {side} header")]
    OutputFieldsMissing { side: Side, fields: Vec<String> },

    // ===== Data Format Errors =====
    /// A row has no value for the key field
    #[error("Key field {key_field:?} is missing in row at line {line}")]
    MissingKeyField { key_field: String, line: u64 },

    /// A matched row has no value for an output field
    #[error("Field {field:?} has no value for key {key:?} in the {side} input")]
    MissingValue {
        field: String,
        key: String,
        side: Side,
    },

    /// A matched row holds a value that does not parse as a number
    #[error("Field {field:?} for key {key:?} is not numeric: {value:?}")]
    InvalidNumber {
        field: String,
        key: String,
        value: String,
    },

    /// A key appears twice in one input while duplicates are rejected
    #[error("Duplicate key {key:?} at line {line}")]
    DuplicateKey { key: String, line: u64 },

    /// The delimited text itself is malformed
    #[error("Malformed delimited text in {source_name}: {message}")]
    Csv {
        source_name: String,
        line: Option<u64>,
        message: String,
    },

    // ===== IO Errors =====
    /// A source could not be read or the sink could not be written
    #[error("I/O error on {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },
}

impl DeltaError {
    /// Classify a `csv` crate error raised while reading or writing `source_name`
    pub fn from_csv(err: csv::Error, source_name: &str) -> Self {
        if let csv::ErrorKind::Io(io_err) = err.kind() {
            return DeltaError::Io {
                source_name: source_name.to_string(),
                message: io_err.to_string(),
            };
        }
        DeltaError::Csv {
            source_name: source_name.to_string(),
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }

    /// Classify a plain I/O error raised on `source_name`
    pub fn from_io(err: std::io::Error, source_name: &str) -> Self {
        DeltaError::Io {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        let message = err.to_string();
        match err {
            DeltaError::InvalidDelimiter { .. } => {
                ExError::new(ExErrorKind::InvalidDelimiter).with_message(message)
            }
            DeltaError::OutputFieldsMissing { side, fields } => {
                let ex = ExError::new(ExErrorKind::OutputFieldMissing)
                    .with_side(side)
                    .with_message(message);
                match fields.into_iter().next() {
                    Some(field) => ex.with_field(field),
                    None => ex,
                }
            }
            DeltaError::MissingKeyField { key_field, line } => {
                ExError::new(ExErrorKind::MissingKeyField)
                    .with_field(key_field)
                    .with_line(line)
                    .with_message(message)
            }
            DeltaError::MissingValue { field, key, side } => {
                ExError::new(ExErrorKind::MissingValue)
                    .with_field(field)
                    .with_key(key)
                    .with_side(side)
                    .with_message(message)
            }
            DeltaError::InvalidNumber { field, key, .. } => {
                ExError::new(ExErrorKind::InvalidNumber)
                    .with_field(field)
                    .with_key(key)
                    .with_message(message)
            }
            DeltaError::DuplicateKey { key, line } => ExError::new(ExErrorKind::DuplicateKey)
                .with_key(key)
                .with_line(line)
                .with_message(message),
            DeltaError::Csv {
                source_name, line, ..
            } => {
                let ex = ExError::new(ExErrorKind::Csv)
                    .with_source_name(source_name)
                    .with_message(message);
                match line {
                    Some(line) => ex.with_line(line),
                    None => ex,
                }
            }
            DeltaError::Io { source_name, .. } => ExError::new(ExErrorKind::Io)
                .with_source_name(source_name)
                .with_message(message),
        }
    }
}
