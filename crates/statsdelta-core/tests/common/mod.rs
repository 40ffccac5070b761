use statsdelta_core::{CsvDialect, DeltaOptions, DeltaSet, DuplicateKeyPolicy, RecordStore};
use std::path::{Path, PathBuf};

/// Load a comma-delimited store from inline text
#[allow(dead_code)]
pub fn store(text: &str, key_field: &str) -> RecordStore {
    RecordStore::from_reader(
        text.as_bytes(),
        "inline",
        key_field,
        &CsvDialect::default(),
        DuplicateKeyPolicy::LastWriteWins,
    )
    .unwrap()
}

/// Output field names from string literals
#[allow(dead_code)]
pub fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Compare two inline inputs with default options
#[allow(dead_code)]
pub fn deltas(from: &str, to: &str, key_field: &str, output_fields: &[&str]) -> DeltaSet {
    statsdelta_core::compute_deltas(
        &store(from, key_field),
        &store(to, key_field),
        &fields(output_fields),
        &DeltaOptions::default(),
    )
    .unwrap()
}

/// Write `contents` to `name` inside `dir` and return the path
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
