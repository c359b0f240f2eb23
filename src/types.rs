//! Core data model types for the ingestion pipeline.
//!
//! Files are read into an in-memory [`TextTable`] where every cell is opaque
//! text or null. Typing is deferred to the destination table; nothing in this
//! crate coerces values, which preserves leading zeros and mixed date formats.

use std::fmt;
use std::path::PathBuf;

/// A file selected for ingestion by the collector.
///
/// Invariant: `size > 0` (zero-byte files are never candidates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute or caller-relative path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Lower-cased extension without the dot (e.g. `csv`).
    pub extension: String,
}

impl CandidateFile {
    /// Table name derived from the file name (stem without extension).
    pub fn table_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string())
    }
}

/// In-memory tabular data with all values as text.
///
/// Rows are stored as `Vec<Vec<Option<String>>>` in the same order as
/// `columns`; `None` represents an empty cell. Every row has exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    /// Column names from the file's header row.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Option<String>>>,
}

impl TextTable {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Why a file was skipped rather than loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero-byte input file.
    EmptyFile,
    /// The file decoded and parsed but has a header row and no data rows.
    ///
    /// Kept distinct from [`SkipReason::EmptyFile`] because operators treat
    /// the two differently during troubleshooting.
    HeaderOnly,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyFile => write!(f, "empty-file"),
            SkipReason::HeaderOnly => write!(f, "header-only"),
        }
    }
}

/// Per-file result of an ingestion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// All rows were written.
    Success {
        /// Number of rows committed to the destination table.
        rows: usize,
    },
    /// The file was skipped; no table was touched.
    Skipped(SkipReason),
    /// The file failed partway; earlier chunks are not rolled back.
    Failed {
        /// Rows already committed before the failure.
        rows_written: usize,
        /// Error detail for the failing step.
        error: String,
    },
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportOutcome::Success { rows } => write!(f, "PASS (rows={rows})"),
            ImportOutcome::Skipped(reason) => write!(f, "SKIP ({reason})"),
            ImportOutcome::Failed { rows_written, error } => {
                write!(f, "FAIL after {rows_written} rows: {error}")
            }
        }
    }
}

/// What to do when the target table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistsPolicy {
    /// Append to the existing table, creating it when missing.
    #[default]
    Append,
    /// Drop and recreate the table before the first chunk.
    Replace,
    /// Abort the file if the table exists.
    Fail,
}

/// Aggregated counts for one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Files for which an import was attempted.
    pub attempted: usize,
    /// Files fully written.
    pub succeeded: usize,
    /// Files skipped (empty or header-only).
    pub skipped: usize,
    /// Files that failed.
    pub failed: usize,
}

impl RunSummary {
    /// Fold one file outcome into the summary.
    pub fn record(&mut self, outcome: &ImportOutcome) {
        self.attempted += 1;
        match outcome {
            ImportOutcome::Success { .. } => self.succeeded += 1,
            ImportOutcome::Skipped(_) => self.skipped += 1,
            ImportOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// True when at least one file failed; drives the process exit code.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted={}, succeeded={}, skipped={}, failed={}",
            self.attempted, self.succeeded, self.skipped, self.failed
        )
    }
}
