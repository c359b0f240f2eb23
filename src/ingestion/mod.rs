//! Reading delimited flat files of unknown encoding and delimiter.
//!
//! Most callers should use [`read_table`] (from [`reader`]) which:
//!
//! - rejects empty files up front
//! - detects an encoding hint and retries down a ranked fallback chain
//! - sniffs the field separator per file
//! - parses rows as opaque text into a [`crate::types::TextTable`]
//!
//! The detectors are also available standalone under:
//! - [`encoding`]
//! - [`delimiter`]

pub mod delimiter;
pub mod encoding;
pub mod reader;

pub use delimiter::detect_delimiter;
pub use encoding::{candidate_encodings, detect_encoding, detect_encoding_in};
pub use reader::{read_table, read_table_from_bytes, ReadOutcome};
