//! Observer interface for per-file outcomes and run summaries.
//!
//! Reporting is a cross-cutting concern injected into the orchestrator so the
//! pipeline is testable without a terminal. The stderr observer keeps the
//! interactive surface scannable (one line per file); the file observer is
//! the durable run log that carries full error detail.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::types::{ImportOutcome, RunSummary};

/// Context about the file an outcome belongs to.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// The source file.
    pub path: PathBuf,
    /// Destination table name.
    pub table: String,
    /// Encoding label used to read the file, when a read happened.
    pub encoding: Option<&'static str>,
}

/// Observer interface for ingestion runs.
pub trait ImportObserver: Send + Sync {
    /// Called as each file's outcome is decided, in run order.
    fn on_file_outcome(&self, _ctx: &FileContext, _outcome: &ImportOutcome) {}

    /// Called once at the end of a run with the aggregate summary.
    fn on_run_summary(&self, _summary: &RunSummary) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_file_outcome(&self, ctx: &FileContext, outcome: &ImportOutcome) {
        for o in &self.observers {
            o.on_file_outcome(ctx, outcome);
        }
    }

    fn on_run_summary(&self, summary: &RunSummary) {
        for o in &self.observers {
            o.on_run_summary(summary);
        }
    }
}

/// Logs one line per file (and the summary) to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ImportObserver for StdErrObserver {
    fn on_file_outcome(&self, ctx: &FileContext, outcome: &ImportOutcome) {
        let name = file_name(&ctx.path);
        match ctx.encoding {
            Some(enc) => eprintln!("{outcome} {name} [{enc}] -> {}", ctx.table),
            None => eprintln!("{outcome} {name} -> {}", ctx.table),
        }
    }

    fn on_run_summary(&self, summary: &RunSummary) {
        eprintln!("run summary: {summary}");
    }
}

/// Appends timestamped outcome lines to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored so logging can never fail an import.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_file_outcome(&self, ctx: &FileContext, outcome: &ImportOutcome) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let encoding = ctx.encoding.unwrap_or("-");
        self.append_line(&format!(
            "{stamp} | {} | {encoding} | {outcome}",
            file_name(&ctx.path)
        ));
    }

    fn on_run_summary(&self, summary: &RunSummary) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append_line(&format!("{stamp} | run summary | {summary}"));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
