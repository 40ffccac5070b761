//! Command-line arguments
//!
//! Usage: statsdelta -from <PATH> -to <PATH> -key-field <NAME>
//!        [-delimiter <CHAR|TAB>] [-output-fields <A,B,...>]

use clap::{Parser, ValueEnum};
use statsdelta_core::config::{
    CsvDialect, DeltaOptions, DeltaRequest, DuplicateKeyPolicy, EdgeDeltaStyle,
};
use statsdelta_core::fields::parse_field_list;
use statsdelta_core::logging_facility::Profile;
use statsdelta_core::DeltaError;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may be spelled with a single dash
const LONG_FLAGS: &[&str] = &[
    "from",
    "to",
    "key-field",
    "delimiter",
    "output-fields",
    "numeric-edge-deltas",
    "reject-duplicate-keys",
    "log-format",
];

/// Long flags followed by a separate value argument
const VALUE_FLAGS: &[&str] = &[
    "from",
    "to",
    "key-field",
    "delimiter",
    "output-fields",
    "log-format",
];

#[derive(Debug, Parser)]
#[command(name = "statsdelta")]
#[command(
    about = "Returns a delta statistic of two given statistics",
    long_about = None
)]
pub struct Cli {
    /// The file to use as the left or from source for the delta calculation
    #[arg(long = "from", value_name = "PATH")]
    pub from: PathBuf,

    /// The file to use as the right or to source for the delta calculation
    #[arg(long = "to", value_name = "PATH")]
    pub to: PathBuf,

    /// The key field name (column name)
    #[arg(long = "key-field", value_name = "NAME")]
    pub key_field: String,

    /// The field delimiter used within the files; use TAB for tab-delimited
    #[arg(long, value_name = "CHAR", default_value = ",")]
    pub delimiter: String,

    /// Comma-separated names of the fields to include in the delta output
    /// (default: the header of the from file without the key field)
    #[arg(long = "output-fields", value_name = "FIELDS")]
    pub output_fields: Option<String>,

    /// Render added/deleted deltas as signed numbers instead of prefixed raw values
    #[arg(long = "numeric-edge-deltas")]
    pub numeric_edge_deltas: bool,

    /// Fail when a key occurs more than once in one input
    #[arg(long = "reject-duplicate-keys")]
    pub reject_duplicate_keys: bool,

    /// Format of diagnostic logs written to stderr
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

impl Cli {
    /// Parse arguments, accepting single-dash spellings of the long flags
    pub fn parse_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Build the core request from the parsed flags
    pub fn to_request(&self) -> Result<DeltaRequest, DeltaError> {
        let dialect = CsvDialect::from_delimiter_arg(&self.delimiter)?;
        let output_fields = self
            .output_fields
            .as_deref()
            .map(parse_field_list)
            .unwrap_or_default();
        let options = DeltaOptions {
            edge_deltas: if self.numeric_edge_deltas {
                EdgeDeltaStyle::Numeric
            } else {
                EdgeDeltaStyle::Prefixed
            },
            duplicate_keys: if self.reject_duplicate_keys {
                DuplicateKeyPolicy::Reject
            } else {
                DuplicateKeyPolicy::LastWriteWins
            },
        };

        Ok(DeltaRequest::new(&self.from, &self.to, &self.key_field)
            .with_dialect(dialect)
            .with_output_fields(output_fields)
            .with_options(options))
    }
}

/// Rewrite `-flag` to `--flag` for the known long flags
///
/// Arguments in value position are passed through untouched, so a file
/// literally named `-to` still works as the value of `-from`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut value_pending = false;

    for arg in args {
        if value_pending {
            value_pending = false;
            normalized.push(arg);
            continue;
        }
        let text = match arg.to_str() {
            Some(text) => text.to_owned(),
            None => {
                normalized.push(arg);
                continue;
            }
        };

        let (single_dash, body) = match text.strip_prefix("--") {
            Some(body) => (false, body),
            None => match text.strip_prefix('-') {
                Some(body) => (true, body),
                None => {
                    normalized.push(arg);
                    continue;
                }
            },
        };
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        if !LONG_FLAGS.contains(&name) {
            normalized.push(arg);
            continue;
        }

        value_pending = !inline_value && VALUE_FLAGS.contains(&name);
        if single_dash {
            normalized.push(OsString::from(format!("-{}", text)));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}
