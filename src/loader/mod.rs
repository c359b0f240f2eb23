//! Chunked table loader.
//!
//! Splits a [`TextTable`] into consecutive chunks of at most `chunk_size`
//! rows and appends them to the destination in file order. There is no
//! cross-chunk transaction: a chunk failure aborts the remaining chunks and
//! reports the rows already committed (at-least-once, partial-success model).
//! Callers needing exactly-once semantics must truncate the target first.

mod sink;

pub use sink::{SqliteSink, TableSink};

use crate::types::{ExistsPolicy, ImportOutcome, TextTable};

/// Options for [`load_table`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Rows per chunk. Minimum 1.
    pub chunk_size: usize,
    /// What to do when the target table already exists.
    pub exists_policy: ExistsPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            exists_policy: ExistsPolicy::default(),
        }
    }
}

/// Load a table of text rows into `table_name` on the given sink.
///
/// The exists-policy applies once, before the first chunk; every chunk is an
/// append. Errors never propagate: they are converted into
/// [`ImportOutcome::Failed`] carrying the partial row count already
/// committed.
///
/// # Panics
///
/// Panics if `opts.chunk_size == 0`.
pub fn load_table(
    sink: &mut dyn TableSink,
    table_name: &str,
    data: &TextTable,
    opts: &LoadOptions,
) -> ImportOutcome {
    assert!(opts.chunk_size > 0, "chunk_size must be > 0");

    if let Err(e) = sink.prepare(table_name, &data.columns, opts.exists_policy) {
        return ImportOutcome::Failed {
            rows_written: 0,
            error: e.to_string(),
        };
    }

    let mut rows_written = 0usize;
    for chunk in data.rows.chunks(opts.chunk_size) {
        if let Err(e) = sink.append_rows(table_name, &data.columns, chunk) {
            return ImportOutcome::Failed {
                rows_written,
                error: e.to_string(),
            };
        }
        rows_written += chunk.len();
    }

    ImportOutcome::Success { rows: rows_written }
}
