//! Keyed record store.
//!
//! Loads one delimited input completely into memory, indexed by the trimmed
//! value of the key field.

use crate::config::{CsvDialect, DuplicateKeyPolicy};
use crate::errors::{DeltaError, Result};
use crate::model::Record;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// All rows of one input, indexed by key
///
/// `header` is sampled from the first data row only, so an input with a
/// header line but no data rows has an empty header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordStore {
    source_name: String,
    header: Vec<String>,
    records: BTreeMap<String, Record>,
    rows: usize,
    overwritten: usize,
}

impl RecordStore {
    /// Load the file at `path`
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be opened or read
    /// - `Csv`: the text is not valid delimited text / UTF-8
    /// - `MissingKeyField`: a row has no value for `key_field`
    /// - `DuplicateKey`: a key repeats and `duplicates` is `Reject`
    pub fn open(
        path: &Path,
        key_field: &str,
        dialect: &CsvDialect,
        duplicates: DuplicateKeyPolicy,
    ) -> Result<Self> {
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|e| DeltaError::from_io(e, &source_name))?;
        Self::from_reader(file, &source_name, key_field, dialect, duplicates)
    }

    /// Load from any reader; `source_name` only labels errors
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::open`], minus the open failure.
    pub fn from_reader<R: Read>(
        reader: R,
        source_name: &str,
        key_field: &str,
        dialect: &CsvDialect,
        duplicates: DuplicateKeyPolicy,
    ) -> Result<Self> {
        let mut reader = dialect.reader_builder().from_reader(reader);
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| DeltaError::from_csv(e, source_name))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut store = RecordStore {
            source_name: source_name.to_string(),
            ..RecordStore::default()
        };

        let mut row = csv::StringRecord::new();
        while reader
            .read_record(&mut row)
            .map_err(|e| DeltaError::from_csv(e, source_name))?
        {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let record = Record::from_row(&columns, row.iter());
            let key = record
                .get(key_field)
                .ok_or_else(|| DeltaError::MissingKeyField {
                    key_field: key_field.to_string(),
                    line,
                })?
                .trim()
                .to_string();

            if store.rows == 0 {
                store.header = record.field_names().map(str::to_string).collect();
            }
            store.rows += 1;

            if store.records.contains_key(&key) {
                if duplicates == DuplicateKeyPolicy::Reject {
                    return Err(DeltaError::DuplicateKey { key, line });
                }
                tracing::debug!(
                    source = source_name,
                    key = key.as_str(),
                    line,
                    "duplicate key replaces earlier row"
                );
                store.overwritten += 1;
            }
            store.records.insert(key, record);
        }

        Ok(store)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Field names of the first data row, in column order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Keys with their records, in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of data rows read, duplicates included
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of rows that replaced an earlier row with the same key
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str, key_field: &str) -> Result<RecordStore> {
        RecordStore::from_reader(
            text.as_bytes(),
            "inline",
            key_field,
            &CsvDialect::default(),
            DuplicateKeyPolicy::LastWriteWins,
        )
    }

    #[test]
    fn test_keys_are_trimmed() {
        let store = load("id,score\n  7 ,1\n", "id").unwrap();
        assert!(store.contains_key("7"));
        assert_eq!(store.get("7").and_then(|r| r.get("id")), Some("  7 "));
    }

    #[test]
    fn test_header_sampled_from_first_row() {
        let store = load("id,a,b\n1,2,3\n4,5,6\n", "id").unwrap();
        assert_eq!(store.header(), ["id", "a", "b"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_header_empty_without_data_rows() {
        let store = load("id,a,b\n", "id").unwrap();
        assert!(store.header().is_empty());
        assert!(store.is_empty());

        let store = load("", "id").unwrap();
        assert!(store.header().is_empty());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let store = load("id,a\n1,old\n2,x\n1,new\n", "id").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.rows(), 3);
        assert_eq!(store.overwritten(), 1);
        assert_eq!(store.get("1").and_then(|r| r.get("a")), Some("new"));
    }

    #[test]
    fn test_duplicate_key_rejected_when_configured() {
        let err = RecordStore::from_reader(
            "id,a\n1,old\n 1,new\n".as_bytes(),
            "inline",
            "id",
            &CsvDialect::default(),
            DuplicateKeyPolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DeltaError::DuplicateKey {
                key: "1".to_string(),
                line: 3
            }
        );
    }

    #[test]
    fn test_missing_key_column_fails() {
        let err = load("name,a\nx,1\n", "id").unwrap_err();
        assert_eq!(
            err,
            DeltaError::MissingKeyField {
                key_field: "id".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_short_row_without_key_value_fails() {
        let err = load("a,id\n1,2\n3\n", "id").unwrap_err();
        assert!(matches!(err, DeltaError::MissingKeyField { line: 3, .. }));
    }

    #[test]
    fn test_quoted_fields_and_custom_delimiter() {
        let store = RecordStore::from_reader(
            "id;label\n1;\"a;b\"\n".as_bytes(),
            "inline",
            "id",
            &CsvDialect::new(b';'),
            DuplicateKeyPolicy::LastWriteWins,
        )
        .unwrap();
        assert_eq!(store.get("1").and_then(|r| r.get("label")), Some("a;b"));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = RecordStore::open(
            Path::new("/nonexistent/statsdelta/input.csv"),
            "id",
            &CsvDialect::default(),
            DuplicateKeyPolicy::LastWriteWins,
        )
        .unwrap_err();
        assert!(matches!(err, DeltaError::Io { .. }));
    }
}
