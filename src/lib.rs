//! `flatload` ingests delimited flat files of unknown encoding and unknown
//! delimiter into SQL tables, in bounded-memory chunks, with a verifiable
//! success/failure/skip outcome per file.
//!
//! ## Pipeline
//!
//! 1. [`collect::collect_files`] turns an input path (file or directory) into
//!    an ordered list of non-empty candidate files.
//! 2. [`ingestion::read_table`] detects the file's encoding (with a ranked
//!    fallback chain) and field separator, then parses rows as opaque text
//!    into a [`types::TextTable`]. Empty and header-only files are skipped
//!    with distinct reasons.
//! 3. [`loader::load_table`] appends the rows to a destination table in
//!    fixed-size chunks through a [`loader::TableSink`]. A chunk failure
//!    stops the file and reports the rows already committed; earlier chunks
//!    are not rolled back.
//! 4. [`run::IngestRunner`] sequences the above per file, aggregates a
//!    [`types::RunSummary`], and optionally triggers a post-run backup.
//!
//! ## Quick example
//!
//! ```no_run
//! use flatload::loader::SqliteSink;
//! use flatload::run::{IngestRunner, RunOptions};
//!
//! # fn main() -> Result<(), flatload::IngestError> {
//! let sink = SqliteSink::open("imported.db")?;
//! let mut runner = IngestRunner::new(sink, RunOptions::default());
//! let summary = runner.run("exports/")?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! All values are loaded as text or null; no type coercion happens on the
//! way in, which preserves leading zeros and mixed date formats. Typing is
//! the destination's concern.
//!
//! ## Modules
//!
//! - [`collect`]: candidate file collection
//! - [`ingestion`]: encoding/delimiter detection and row reading
//! - [`loader`]: chunked table loading and the sink abstraction
//! - [`run`]: the per-run orchestrator
//! - [`observability`]: outcome reporting (stderr + durable run log)
//! - [`console`]: operator confirmation capability
//! - [`backup`]: post-import backup collaborator
//! - [`types`]: core data model
//! - [`error`]: error types used across the pipeline

pub mod backup;
pub mod collect;
pub mod console;
pub mod error;
pub mod ingestion;
pub mod loader;
pub mod observability;
pub mod run;
pub mod types;

pub use error::{IngestError, IngestResult};
