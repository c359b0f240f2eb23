use std::fs;

use flatload::collect::{collect_files, default_extensions, RUN_LOG_NAME};
use flatload::IngestError;

fn names(candidates: &[flatload::types::CandidateFile]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn directory_yields_matching_nonempty_files_in_lexicographic_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "x,y\n1,2\n").unwrap();
    fs::write(dir.path().join("a.csv"), "x,y\n1,2\n").unwrap();
    fs::write(dir.path().join("c.exp"), "").unwrap(); // zero bytes
    fs::write(dir.path().join("d.json"), "{}").unwrap(); // wrong extension

    let candidates = collect_files(dir.path(), &default_extensions()).unwrap();
    assert_eq!(names(&candidates), vec!["a.csv", "b.txt"]);
}

#[test]
fn candidates_carry_size_and_lowercased_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("DATA.CSV"), "x\n1\n").unwrap();

    let candidates = collect_files(dir.path(), &default_extensions()).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].extension, "csv");
    assert!(candidates[0].size > 0);
}

#[test]
fn single_matching_file_yields_itself() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("only.csv");
    fs::write(&file, "x\n1\n").unwrap();

    let candidates = collect_files(&file, &default_extensions()).unwrap();
    assert_eq!(names(&candidates), vec!["only.csv"]);
}

#[test]
fn single_file_with_wrong_extension_yields_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.json");
    fs::write(&file, "{}").unwrap();

    let candidates = collect_files(&file, &default_extensions()).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn single_zero_byte_file_yields_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.csv");
    fs::write(&file, "").unwrap();

    let candidates = collect_files(&file, &default_extensions()).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn run_log_is_never_a_candidate() {
    let dir = tempfile::tempdir().unwrap();
    // The run log has a .txt extension and would otherwise match.
    fs::write(dir.path().join(RUN_LOG_NAME), "old log line\n").unwrap();
    fs::write(dir.path().join("real.txt"), "x\n1\n").unwrap();

    let candidates = collect_files(dir.path(), &default_extensions()).unwrap();
    assert_eq!(names(&candidates), vec!["real.txt"]);
}

#[test]
fn nonexistent_path_is_a_surfaced_error() {
    let err = collect_files("no/such/path", &default_extensions()).unwrap_err();
    assert!(matches!(err, IngestError::Path { .. }));
}

#[test]
fn custom_extension_list_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.tsv"), "x\ty\n1\t2\n").unwrap();
    fs::write(dir.path().join("b.csv"), "x,y\n1,2\n").unwrap();

    let candidates = collect_files(dir.path(), &["tsv".to_string()]).unwrap();
    assert_eq!(names(&candidates), vec!["a.tsv"]);
}
