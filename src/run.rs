//! Ingestion orchestrator.
//!
//! Sequences collect -> confirm -> per-file import -> summary -> optional
//! backup. Each file's outcome is independent: a failure on one file never
//! prevents the next from being attempted. Path errors and a declined
//! confirmation abort the run before any file is touched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backup::{BackupRequest, BackupRunner};
use crate::collect::{collect_files, default_extensions};
use crate::console::{AlwaysYes, Confirmer};
use crate::error::IngestResult;
use crate::ingestion::{read_table, ReadOutcome};
use crate::loader::{load_table, LoadOptions, TableSink};
use crate::observability::{FileContext, ImportObserver};
use crate::types::{CandidateFile, ImportOutcome, RunSummary};

/// Configuration for one ingestion run.
///
/// Everything the run needs is explicit here; there is no ambient state, so
/// runs are isolated and testable.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Accepted file extensions (without dots, case-insensitive).
    pub extensions: Vec<String>,
    /// Explicit target table for every file; `None` derives per-file names
    /// from file stems.
    pub table: Option<String>,
    /// Chunking and exists-policy for the loader.
    pub load: LoadOptions,
    /// Destination identity shown in prompts and used for backup naming.
    pub destination_label: String,
    /// Tag included in the backup artifact name.
    pub backup_message: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            table: None,
            load: LoadOptions::default(),
            destination_label: "database".to_string(),
            backup_message: "import".to_string(),
        }
    }
}

/// Drives a full ingestion run over a sink with injected collaborators.
pub struct IngestRunner<S: TableSink> {
    sink: S,
    confirmer: Box<dyn Confirmer>,
    observer: Option<Arc<dyn ImportObserver>>,
    backup: Option<Box<dyn BackupRunner>>,
    opts: RunOptions,
}

impl<S: TableSink> IngestRunner<S> {
    /// Create a runner with an always-yes confirmer and no observer/backup.
    pub fn new(sink: S, opts: RunOptions) -> Self {
        Self {
            sink,
            confirmer: Box::new(AlwaysYes),
            observer: None,
            backup: None,
            opts,
        }
    }

    /// Replace the confirmation policy.
    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'static) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    /// Attach an observer for per-file outcomes and the run summary.
    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Attach a backup collaborator, prompted for after a successful run.
    pub fn with_backup(mut self, backup: impl BackupRunner + 'static) -> Self {
        self.backup = Some(Box::new(backup));
        self
    }

    /// Borrow the sink (e.g. to inspect the destination in tests).
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run the pipeline over `input` (a file or a directory).
    pub fn run(&mut self, input: impl AsRef<Path>) -> IngestResult<RunSummary> {
        let input = input.as_ref();
        let candidates = collect_files(input, &self.opts.extensions)?;

        let mut summary = RunSummary::default();
        if candidates.is_empty() {
            self.emit_summary(&summary);
            return Ok(summary);
        }

        let prompt = format!(
            "Import {} file(s) to {}?",
            candidates.len(),
            self.opts.destination_label
        );
        if !self.confirmer.confirm(&prompt) {
            return Ok(summary);
        }

        for candidate in &candidates {
            let table = self
                .opts
                .table
                .clone()
                .unwrap_or_else(|| candidate.table_stem());
            let (outcome, encoding) = self.import_one(candidate, &table);
            summary.record(&outcome);
            if let Some(obs) = &self.observer {
                obs.on_file_outcome(
                    &FileContext {
                        path: candidate.path.clone(),
                        table,
                        encoding,
                    },
                    &outcome,
                );
            }
        }

        self.emit_summary(&summary);
        self.maybe_backup(input, &summary);
        Ok(summary)
    }

    /// Read then load one file; every error becomes that file's outcome.
    fn import_one(
        &mut self,
        candidate: &CandidateFile,
        table: &str,
    ) -> (ImportOutcome, Option<&'static str>) {
        match read_table(&candidate.path) {
            Ok(ReadOutcome::Skipped(reason)) => (ImportOutcome::Skipped(reason), None),
            Ok(ReadOutcome::Table {
                table: data,
                encoding,
                delimiter: _,
            }) => {
                let outcome = load_table(&mut self.sink, table, &data, &self.opts.load);
                (outcome, Some(encoding.name()))
            }
            Err(e) => (
                ImportOutcome::Failed {
                    rows_written: 0,
                    error: e.to_string(),
                },
                None,
            ),
        }
    }

    fn emit_summary(&self, summary: &RunSummary) {
        if let Some(obs) = &self.observer {
            obs.on_run_summary(summary);
        }
    }

    /// Backup is prompted only after at least one success; its outcome never
    /// retroactively changes the import result.
    fn maybe_backup(&self, input: &Path, summary: &RunSummary) {
        let Some(backup) = &self.backup else {
            return;
        };
        if summary.succeeded == 0 {
            return;
        }
        if !self.confirmer.confirm("Import completed. Backup database?") {
            return;
        }

        let output_dir = if input.is_dir() {
            input.to_path_buf()
        } else {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let request = BackupRequest {
            database_label: backup_label(&self.opts.destination_label),
            output_dir,
            message: self.opts.backup_message.clone(),
        };
        let _ = backup.backup(&request);
    }
}

/// Reduce a destination label (possibly a file path) to a name safe for use
/// in a backup artifact file name.
fn backup_label(label: &str) -> String {
    Path::new(label)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| label.to_string())
}
