use serde::{Deserialize, Serialize};

/// Which of the two compared inputs a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The left, older input
    From,
    /// The right, newer input
    To,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::From => "from",
            Side::To => "to",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input row: an ordered mapping from field name to value
///
/// A value is `None` when the row ended before reaching that column, which is
/// kept distinct from a present-but-empty value (`Some("")`). Field names are
/// unique; when a header repeats a name, the right-most column's value wins
/// while the name keeps its first position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    /// Build a record by pairing header names with row values
    ///
    /// Values past the end of the header are dropped; header names past the
    /// end of the row get no value.
    pub fn from_row<'a, I>(header: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = values.into_iter();
        let mut record = Record {
            fields: Vec::with_capacity(header.len()),
        };
        for name in header {
            record.set(name, values.next().map(str::to_string));
        }
        record
    }

    fn set(&mut self, name: &str, value: Option<String>) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Value of `field`, or `None` if the field is unknown or has no value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == field)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Field names in column order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
