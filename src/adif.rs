//! ADIF tokenizing and record extraction.
//!
//! ADIF is tag-delimited rather than line-delimited: every field is an
//! angle-bracket tag (`<CALL:6>`) followed by its value, and records end at
//! an `<eor>` marker. Line breaks are folded to spaces before matching.
//!
//! The header section before the first `<eor>` is not told apart from the
//! first contact, so header tags (`ADIF_VER`, `EOH`, ...) land in the first
//! record.

use crate::constants::{EOR_PATTERN, FIELD_PATTERN, FIELD_SPEC_SEPARATOR};
use crate::error::Result;
use crate::models::Record;
use regex::Regex;
use std::path::Path;
use tracing::{debug, trace};

/// Counters collected while splitting an ADIF document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Chunks produced by splitting on `<eor>`
    pub chunks_seen: usize,
    /// Empty or whitespace-only chunks
    pub chunks_blank: usize,
    /// Non-blank chunks that contained no tag
    pub chunks_without_fields: usize,
    pub fields_parsed: usize,
    pub records: usize,
}

impl ParseStats {
    /// Chunks that did not produce a record
    pub fn chunks_skipped(&self) -> usize {
        self.chunks_blank + self.chunks_without_fields
    }
}

/// Regex-driven ADIF parser holding its compiled patterns
#[derive(Debug, Clone)]
pub struct AdifParser {
    eor: Regex,
    field: Regex,
}

impl Default for AdifParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AdifParser {
    pub fn new() -> Self {
        // Both patterns are compile-time constants.
        Self {
            eor: Regex::new(EOR_PATTERN).expect("EOR pattern is valid"),
            field: Regex::new(FIELD_PATTERN).expect("field pattern is valid"),
        }
    }

    /// Split ADIF text into records in source order
    pub fn parse(&self, content: &str) -> Vec<Record> {
        self.parse_with_stats(content).0
    }

    /// Split ADIF text into records and report what was skipped
    pub fn parse_with_stats(&self, content: &str) -> (Vec<Record>, ParseStats) {
        let normalized = content.replace(['\r', '\n'], " ");

        let mut records = Vec::new();
        let mut stats = ParseStats::default();

        for chunk in self.eor.split(&normalized) {
            stats.chunks_seen += 1;

            if chunk.trim().is_empty() {
                stats.chunks_blank += 1;
                continue;
            }

            let record = self.parse_chunk(chunk, &mut stats);
            if record.is_empty() {
                trace!("Chunk without tags skipped: {:?}", chunk.trim());
                stats.chunks_without_fields += 1;
                continue;
            }

            records.push(record);
        }

        stats.records = records.len();
        debug!(
            "Parsed {} records from {} chunks ({} skipped, {} fields)",
            stats.records,
            stats.chunks_seen,
            stats.chunks_skipped(),
            stats.fields_parsed
        );

        (records, stats)
    }

    fn parse_chunk(&self, chunk: &str, stats: &mut ParseStats) -> Record {
        let mut record = Record::new();

        for caps in self.field.captures_iter(chunk) {
            let tag = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());

            record.insert(field_name(tag), value.trim());
            stats.fields_parsed += 1;
        }

        record
    }
}

/// Strip the `:length[:type]` annotation from a tag and normalize its case
pub fn field_name(tag: &str) -> String {
    tag.split(FIELD_SPEC_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_uppercase()
}

/// Parse ADIF text with a freshly compiled parser
pub fn parse_adif(content: &str) -> Vec<Record> {
    AdifParser::new().parse(content)
}

/// Read an ADIF file as UTF-8, dropping byte sequences that are not valid
pub fn read_adif_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let mut content = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        content.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    if dropped > 0 {
        debug!(
            "Dropped {} invalid UTF-8 bytes from {}",
            dropped,
            path.display()
        );
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fields(record: &Record) -> Vec<(&str, &str)> {
        record.iter().collect()
    }

    #[test]
    fn test_two_record_example() {
        let records = parse_adif("<CALL>DJ0DE<BAND>40M<eor><CALL>W1AW<MODE:3>SSB<eor>");

        assert_eq!(records.len(), 2);
        assert_eq!(fields(&records[0]), vec![("CALL", "DJ0DE"), ("BAND", "40M")]);
        assert_eq!(fields(&records[1]), vec![("CALL", "W1AW"), ("MODE", "SSB")]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let content = "<CALL:5>DJ0DE\r\n<BAND:3>40M\r\n<EOR>\n<CALL:4>W1AW\r<BAND:3>20M\r<eor>\r\n\
                       <CALL:5>K1ABC\n<BAND:3>15M\n<Eor>\n";
        let records = parse_adif(content);

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("CALL"), Some("K1ABC"));
        assert_eq!(records[1].get("BAND"), Some("20M"));
    }

    #[test]
    fn test_case_insensitive_names() {
        let lower = parse_adif("<call>DJ0DE<eor>");
        let upper = parse_adif("<CALL>DJ0DE<EOR>");

        assert_eq!(lower, upper);
        assert_eq!(lower[0].get("CALL"), Some("DJ0DE"));
    }

    #[test]
    fn test_type_suffix_discarded() {
        let records = parse_adif("<CALL:6>DJ0DE <QSO_DATE:8:D>20260103 <eor>");

        assert_eq!(records[0].get("CALL"), Some("DJ0DE"));
        assert_eq!(records[0].get("QSO_DATE"), Some("20260103"));
    }

    #[test]
    fn test_field_name_normalization() {
        assert_eq!(field_name("call:6"), "CALL");
        assert_eq!(field_name(" freq : 6 : N"), "FREQ");
        assert_eq!(field_name(""), "");
    }

    #[test]
    fn test_empty_value_kept() {
        let records = parse_adif("<CALL>W1AW<COMMENT><eor>");

        assert_eq!(records[0].get("COMMENT"), Some(""));
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_duplicate_field_last_write_wins() {
        let records = parse_adif("<CALL>W1AW<BAND>20M<CALL>K1ABC<eor>");

        assert_eq!(records[0].get("CALL"), Some("K1ABC"));
        assert_eq!(records[0].names().collect::<Vec<_>>(), vec!["CALL", "BAND"]);
    }

    #[test]
    fn test_header_merges_into_first_record() {
        let content = "Exported log\n<ADIF_VER:5>3.1.4\n<EOH>\n<CALL:4>W1AW<EOR>\n<CALL:5>DJ0DE<EOR>\n";
        let records = parse_adif(content);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ADIF_VER"), Some("3.1.4"));
        assert_eq!(records[0].get("EOH"), Some(""));
        assert_eq!(records[0].get("CALL"), Some("W1AW"));
        assert_eq!(records[1].get("ADIF_VER"), None);
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse_adif("").is_empty());
        assert!(parse_adif("  \r\n  ").is_empty());
        assert!(parse_adif("just a header comment without tags").is_empty());
        assert!(parse_adif("<eor><EOR>  <eor>").is_empty());
    }

    #[test]
    fn test_missing_eor_is_single_record() {
        let records = parse_adif("<CALL>W1AW<BAND>20M<CALL>K1ABC<BAND>40M");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("CALL"), Some("K1ABC"));
    }

    #[test]
    fn test_stats_count_skipped_chunks() {
        let parser = AdifParser::new();
        let (records, stats) = parser.parse_with_stats("header text<eor><CALL>W1AW<eor>   ");

        assert_eq!(records.len(), 1);
        assert_eq!(stats.chunks_seen, 3);
        assert_eq!(stats.chunks_blank, 1);
        assert_eq!(stats.chunks_without_fields, 1);
        assert_eq!(stats.chunks_skipped(), 2);
        assert_eq!(stats.fields_parsed, 1);
    }

    #[test]
    fn test_read_adif_file_drops_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"<CALL>W1\xffAW<eor>").unwrap();

        let content = read_adif_file(temp_file.path()).unwrap();
        assert_eq!(content, "<CALL>W1AW<eor>");
    }

    #[test]
    fn test_read_adif_file_missing() {
        let result = read_adif_file(Path::new("/nonexistent/log.adi"));
        assert!(matches!(result, Err(crate::error::AdifError::Io(_))));
    }
}
