//! Delta output types.
//!
//! A [`DeltaSet`] is a `BTreeMap` keyed by the trimmed record key, so
//! iterating it yields rows in ascending byte order of the key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Change classification of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeStatus {
    /// Present on both sides, at least one output field differs
    #[serde(rename = "changed")]
    Changed,
    /// Present on both sides, every output field delta is zero
    #[serde(rename = "not changed")]
    NotChanged,
    /// Present only in the `to` input
    #[serde(rename = "added")]
    Added,
    /// Present only in the `from` input
    #[serde(rename = "deleted")]
    Deleted,
}

impl ChangeStatus {
    /// Label rendered in the status column
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Changed => "changed",
            ChangeStatus::NotChanged => "not changed",
            ChangeStatus::Added => "added",
            ChangeStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Old value, new value and delta of one output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    /// Output field name
    pub field: String,
    /// Value in the `from` input (None for added keys)
    pub from: Option<String>,
    /// Value in the `to` input (None for deleted keys)
    pub to: Option<String>,
    /// Rendered delta (None only when the single side's value is absent)
    pub delta: Option<String>,
}

/// Comparison result for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRecord {
    pub key: String,
    pub status: ChangeStatus,
    /// One entry per output field, in output field order
    pub fields: Vec<FieldDelta>,
}

impl DeltaRecord {
    /// Look up the delta of one output field
    pub fn field(&self, name: &str) -> Option<&FieldDelta> {
        self.fields.iter().find(|f| f.field == name)
    }
}

/// All delta records, keyed and ordered by key
pub type DeltaSet = BTreeMap<String, DeltaRecord>;

/// Per-status row counts of a delta set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaSummary {
    pub rows: usize,
    pub added: usize,
    pub deleted: usize,
    pub changed: usize,
    pub not_changed: usize,
}

impl DeltaSummary {
    pub fn of(deltas: &DeltaSet) -> Self {
        deltas
            .values()
            .fold(DeltaSummary::default(), |mut summary, record| {
                summary.rows += 1;
                match record.status {
                    ChangeStatus::Added => summary.added += 1,
                    ChangeStatus::Deleted => summary.deleted += 1,
                    ChangeStatus::Changed => summary.changed += 1,
                    ChangeStatus::NotChanged => summary.not_changed += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, status: ChangeStatus) -> DeltaRecord {
        DeltaRecord {
            key: key.to_string(),
            status,
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_status_serializes_as_column_label() {
        for status in [
            ChangeStatus::Changed,
            ChangeStatus::NotChanged,
            ChangeStatus::Added,
            ChangeStatus::Deleted,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_summary_counts_each_status() {
        let mut set = DeltaSet::new();
        for (key, status) in [
            ("a", ChangeStatus::Changed),
            ("b", ChangeStatus::Deleted),
            ("c", ChangeStatus::Deleted),
            ("d", ChangeStatus::NotChanged),
        ] {
            set.insert(key.to_string(), record(key, status));
        }

        let summary = DeltaSummary::of(&set);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.not_changed, 1);
        assert_eq!(summary.added, 0);
    }
}
