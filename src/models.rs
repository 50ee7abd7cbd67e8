//! Core data structures for ADIF conversion.
//!
//! Defines the flat contact record produced by the parser and the
//! statistics reported after a conversion run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One contact log entry: field name to raw string value
///
/// Fields keep the position in which their name was first seen. Setting a
/// name that already exists replaces the value in place, so the record's
/// order is stable and later values win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, overwriting any earlier value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Conversion statistics
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub records_written: usize,
    pub columns_written: usize,
    pub fields_parsed: usize,
    pub chunks_skipped: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut record = Record::new();
        record.insert("CALL", "DJ0DE");
        record.insert("BAND", "40M");
        record.insert("CALL", "W1AW");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("CALL"), Some("W1AW"));
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["CALL", "BAND"]);
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = [("CALL", "W1AW"), ("MODE", "SSB")].into_iter().collect();
        assert_eq!(record.get("MODE"), Some("SSB"));
        assert_eq!(record.get("BAND"), None);
        assert!(!record.is_empty());
    }
}
