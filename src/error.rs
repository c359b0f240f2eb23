use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Stage at which a candidate encoding was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStage {
    /// The byte stream was not valid for the encoding.
    Decode,
    /// The stream decoded, but rows did not parse into a uniform shape.
    Parse,
}

/// One rejected candidate encoding, recorded during the fallback loop.
#[derive(Debug, Clone)]
pub struct DecodeAttempt {
    /// Encoding label (e.g. `UTF-8`, `windows-1252`).
    pub encoding: &'static str,
    /// Whether decode or row parsing rejected this candidate.
    pub stage: AttemptStage,
    /// Human-readable error for this candidate.
    pub error: String,
}

/// Error type shared across the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input path does not exist or is neither a file nor a directory.
    #[error("invalid input path {}: {reason}", .path.display())]
    Path { path: PathBuf, reason: String },

    /// No candidate encoding could decode the file.
    #[error("no candidate encoding could decode the file: {}", summarize_attempts(.attempts))]
    DecodeExhausted { attempts: Vec<DecodeAttempt> },

    /// The file decoded under at least one candidate encoding, but row shapes
    /// were inconsistent under every candidate.
    #[error("rows did not parse under any candidate encoding: {}", summarize_attempts(.attempts))]
    Parse { attempts: Vec<DecodeAttempt> },

    /// Destination database error.
    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The target table exists and the exists-policy is `fail`.
    #[error("table '{table}' already exists and exists-policy is 'fail'")]
    TableExists { table: String },
}

impl IngestError {
    /// Classify an exhausted fallback loop: if any candidate decoded but
    /// failed to parse, the file is a parse failure rather than an encoding
    /// failure.
    pub fn from_attempts(attempts: Vec<DecodeAttempt>) -> Self {
        if attempts.iter().any(|a| a.stage == AttemptStage::Parse) {
            IngestError::Parse { attempts }
        } else {
            IngestError::DecodeExhausted { attempts }
        }
    }
}

fn summarize_attempts(attempts: &[DecodeAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.encoding, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}
