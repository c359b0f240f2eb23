//! Row source reader: decode-with-fallback, delimiter sniff, row parsing.
//!
//! The canonical read policy (see DESIGN.md): embedded NUL bytes are stripped
//! after a successful decode; newlines inside quoted fields are preserved
//! as-is. Cells are kept as raw text with empty cells mapped to null.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{AttemptStage, DecodeAttempt, IngestError, IngestResult};
use crate::types::{SkipReason, TextTable};

use super::delimiter::detect_delimiter;
use super::encoding::{candidate_encodings, detect_encoding_in};

/// Result of reading one file.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The file produced a uniform table of text rows.
    Table {
        /// Parsed rows with header-derived columns.
        table: TextTable,
        /// Encoding that successfully decoded the whole file.
        encoding: &'static Encoding,
        /// Sniffed field separator.
        delimiter: u8,
    },
    /// The file was empty or header-only; nothing to load.
    Skipped(SkipReason),
}

/// Read a delimited flat file into a [`TextTable`].
///
/// Rules:
///
/// - Zero-byte files are skipped before any decode work.
/// - Candidate encodings are tried in ranked order; a decode or parse failure
///   advances to the next candidate.
/// - A file with a header row but no data rows is skipped as header-only,
///   which is a different skip reason from an empty file.
pub fn read_table(path: impl AsRef<Path>) -> IngestResult<ReadOutcome> {
    let bytes = std::fs::read(path.as_ref())?;
    read_table_from_bytes(&bytes)
}

/// Same as [`read_table`] over an in-memory byte buffer.
pub fn read_table_from_bytes(bytes: &[u8]) -> IngestResult<ReadOutcome> {
    if bytes.is_empty() {
        return Ok(ReadOutcome::Skipped(SkipReason::EmptyFile));
    }

    let detected = detect_encoding_in(bytes);
    let mut attempts: Vec<DecodeAttempt> = Vec::new();

    for encoding in candidate_encodings(detected) {
        // `decode` strips a recognized BOM and reports malformed sequences.
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            attempts.push(DecodeAttempt {
                encoding: encoding.name(),
                stage: AttemptStage::Decode,
                error: "byte stream is not valid for this encoding".to_string(),
            });
            continue;
        }

        let text = strip_nul_bytes(text);
        let delimiter = detect_delimiter(&text);

        match parse_rows(&text, delimiter) {
            Ok(Some(table)) => {
                return Ok(ReadOutcome::Table {
                    table,
                    encoding,
                    delimiter,
                });
            }
            Ok(None) => return Ok(ReadOutcome::Skipped(SkipReason::HeaderOnly)),
            Err(e) => attempts.push(DecodeAttempt {
                encoding: encoding.name(),
                stage: AttemptStage::Parse,
                error: e.to_string(),
            }),
        }
    }

    Err(IngestError::from_attempts(attempts))
}

/// Strip embedded NUL characters, a common artifact of legacy export tools.
fn strip_nul_bytes(text: Cow<'_, str>) -> Cow<'_, str> {
    if text.contains('\0') {
        Cow::Owned(text.replace('\0', ""))
    } else {
        text
    }
}

/// Parse decoded text into rows with strict field counts.
///
/// Returns `Ok(None)` for a header-only file. Any row whose cell count
/// differs from the header is a parse error for this encoding candidate.
fn parse_rows(text: &str, delimiter: u8) -> Result<Option<TextTable>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let columns = normalize_columns(rdr.headers()?);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(TextTable::new(columns, rows)))
}

/// Make header names usable as SQL column names: trim whitespace, name blank
/// headers, and suffix duplicates so the destination table can be created.
fn normalize_columns(headers: &csv::StringRecord) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let trimmed = raw.trim();
        let base = if trimmed.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 2;
        while columns.iter().any(|c| c == &name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        columns.push(name);
    }
    columns
}
