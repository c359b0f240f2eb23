//! File set collection: turn an input path into an ordered candidate list.

use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::types::CandidateFile;

/// Extensions accepted by default.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["csv", "txt", "exp"];

/// Name of the run log the pipeline itself writes; never a candidate, or a
/// second run in the same directory would try to ingest its own log.
pub const RUN_LOG_NAME: &str = "import_log.txt";

/// Collect candidate files from a file or directory path.
///
/// - A single file yields itself when its extension matches and it is
///   non-empty, otherwise an empty list.
/// - A directory yields its direct children (non-recursive) with accepted
///   extensions and non-zero size, sorted lexicographically by file name for
///   reproducible run order.
/// - A non-existent path is an error, not a silent empty result.
pub fn collect_files(
    input: impl AsRef<Path>,
    extensions: &[String],
) -> IngestResult<Vec<CandidateFile>> {
    let input = input.as_ref();
    let meta = std::fs::metadata(input).map_err(|_| IngestError::Path {
        path: input.to_path_buf(),
        reason: "path does not exist".to_string(),
    })?;

    if meta.is_file() {
        return Ok(candidate_for(input, meta.len(), extensions)
            .into_iter()
            .collect());
    }

    if meta.is_dir() {
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let entry = entry?;
            let entry_meta = entry.metadata()?;
            if !entry_meta.is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy() == RUN_LOG_NAME {
                continue;
            }
            if let Some(c) = candidate_for(&entry.path(), entry_meta.len(), extensions) {
                candidates.push(c);
            }
        }
        candidates.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        return Ok(candidates);
    }

    Err(IngestError::Path {
        path: input.to_path_buf(),
        reason: "path is neither a file nor a directory".to_string(),
    })
}

fn candidate_for(path: &Path, size: u64, extensions: &[String]) -> Option<CandidateFile> {
    if size == 0 {
        return None;
    }
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
        return None;
    }
    Some(CandidateFile {
        path: path.to_path_buf(),
        size,
        extension: ext,
    })
}

/// Owned copy of [`DEFAULT_EXTENSIONS`], handy for options structs.
pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
