//! Post-import backup collaborator.
//!
//! The pipeline treats backup as fire-and-forget: a boolean outcome is
//! surfaced to the operator and never changes the import result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::IngestResult;

/// What to back up and where to put the artifact.
#[derive(Debug, Clone)]
pub struct BackupRequest {
    /// Database identity used in the artifact name.
    pub database_label: String,
    /// Directory for the backup artifact; created when missing.
    pub output_dir: PathBuf,
    /// Free-text tag included in the artifact name.
    pub message: String,
}

impl BackupRequest {
    /// Artifact file name: `{database}_{message}_{YYYY-MM-DD}.bak`.
    pub fn artifact_name(&self) -> String {
        let stamp = chrono::Local::now().format("%Y-%m-%d");
        format!("{}_{}_{stamp}.bak", self.database_label, self.message)
    }
}

/// Backup collaborator interface.
pub trait BackupRunner {
    /// Perform the backup; report success. Failures are the runner's to
    /// surface to the operator.
    fn backup(&self, request: &BackupRequest) -> bool;
}

/// Online backup of a SQLite database file via the SQLite backup API.
#[derive(Debug, Clone)]
pub struct SqliteBackup {
    db_path: PathBuf,
}

impl SqliteBackup {
    /// Back up the database at `db_path`.
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    fn run(&self, request: &BackupRequest) -> IngestResult<PathBuf> {
        std::fs::create_dir_all(&request.output_dir)?;
        let dest = request.output_dir.join(request.artifact_name());

        let src = Connection::open(&self.db_path)?;
        let mut dst = Connection::open(&dest)?;
        let backup = rusqlite::backup::Backup::new(&src, &mut dst)?;
        backup.run_to_completion(64, Duration::ZERO, None)?;
        Ok(dest)
    }
}

impl BackupRunner for SqliteBackup {
    fn backup(&self, request: &BackupRequest) -> bool {
        match self.run(request) {
            Ok(path) => {
                eprintln!("backup complete: {}", path.display());
                true
            }
            Err(e) => {
                eprintln!("backup failed for {}: {e}", self.db_path.display());
                false
            }
        }
    }
}
