use flatload::loader::{load_table, LoadOptions, SqliteSink, TableSink};
use flatload::types::{ExistsPolicy, ImportOutcome, TextTable};

fn people_table() -> TextTable {
    TextTable::new(
        vec!["id".to_string(), "name".to_string()],
        vec![
            vec![Some("1".to_string()), Some("Ada".to_string())],
            vec![Some("2".to_string()), Some("Grace".to_string())],
            vec![Some("3".to_string()), Some("Edsger".to_string())],
        ],
    )
}

fn count_rows(sink: &SqliteSink, table: &str) -> i64 {
    sink.connection()
        .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |r| r.get(0))
        .unwrap()
}

#[test]
fn three_rows_with_chunk_size_two_load_fully() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let outcome = load_table(
        &mut sink,
        "people",
        &people_table(),
        &LoadOptions {
            chunk_size: 2,
            exists_policy: ExistsPolicy::Append,
        },
    );

    assert_eq!(outcome, ImportOutcome::Success { rows: 3 });
    assert_eq!(count_rows(&sink, "people"), 3);
}

#[test]
fn source_row_order_is_preserved_in_the_table() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let _ = load_table(
        &mut sink,
        "people",
        &people_table(),
        &LoadOptions {
            chunk_size: 1,
            exists_policy: ExistsPolicy::Append,
        },
    );

    let names: Vec<String> = sink
        .connection()
        .prepare("SELECT name FROM people")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(names, vec!["Ada", "Grace", "Edsger"]);
}

#[test]
fn rerunning_append_doubles_rows_without_dedup() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let opts = LoadOptions {
        chunk_size: 2,
        exists_policy: ExistsPolicy::Append,
    };

    let first = load_table(&mut sink, "people", &people_table(), &opts);
    let second = load_table(&mut sink, "people", &people_table(), &opts);

    assert_eq!(first, ImportOutcome::Success { rows: 3 });
    assert_eq!(second, ImportOutcome::Success { rows: 3 });
    // At-least-once model: no hidden dedup on re-run.
    assert_eq!(count_rows(&sink, "people"), 6);
}

#[test]
fn replace_policy_applies_only_to_the_first_chunk() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let opts = LoadOptions {
        chunk_size: 1,
        exists_policy: ExistsPolicy::Replace,
    };

    // Pre-existing rows from an earlier run.
    let _ = load_table(&mut sink, "people", &people_table(), &opts);
    // Replace drops them once; the file's own later chunks must survive.
    let outcome = load_table(&mut sink, "people", &people_table(), &opts);

    assert_eq!(outcome, ImportOutcome::Success { rows: 3 });
    assert_eq!(count_rows(&sink, "people"), 3);
}

#[test]
fn fail_policy_fails_the_file_when_table_exists() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let append = LoadOptions {
        chunk_size: 10,
        exists_policy: ExistsPolicy::Append,
    };
    let _ = load_table(&mut sink, "people", &people_table(), &append);

    let fail = LoadOptions {
        chunk_size: 10,
        exists_policy: ExistsPolicy::Fail,
    };
    let outcome = load_table(&mut sink, "people", &people_table(), &fail);

    match outcome {
        ImportOutcome::Failed { rows_written, error } => {
            assert_eq!(rows_written, 0);
            assert!(error.contains("already exists"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // Existing rows untouched.
    assert_eq!(count_rows(&sink, "people"), 3);
}

#[test]
fn constraint_violation_in_second_chunk_keeps_first_chunk() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    sink.connection()
        .execute_batch("CREATE TABLE strict_t (id TEXT NOT NULL, name TEXT);")
        .unwrap();

    // Chunk 1 = two good rows; chunk 2 starts with a NULL id.
    let data = TextTable::new(
        vec!["id".to_string(), "name".to_string()],
        vec![
            vec![Some("1".to_string()), Some("Ada".to_string())],
            vec![Some("2".to_string()), Some("Grace".to_string())],
            vec![None, Some("Nobody".to_string())],
        ],
    );
    let outcome = load_table(
        &mut sink,
        "strict_t",
        &data,
        &LoadOptions {
            chunk_size: 2,
            exists_policy: ExistsPolicy::Append,
        },
    );

    match outcome {
        ImportOutcome::Failed { rows_written, .. } => assert_eq!(rows_written, 2),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(count_rows(&sink, "strict_t"), 2);
}

#[test]
fn all_text_storage_preserves_leading_zeros() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let data = TextTable::new(
        vec!["zip".to_string()],
        vec![vec![Some("01234".to_string())]],
    );
    let _ = load_table(&mut sink, "zips", &data, &LoadOptions::default());

    let zip: String = sink
        .connection()
        .query_row("SELECT zip FROM zips", [], |r| r.get(0))
        .unwrap();
    assert_eq!(zip, "01234");
}

#[test]
fn null_cells_round_trip_as_sql_null() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let data = TextTable::new(
        vec!["id".to_string(), "note".to_string()],
        vec![vec![Some("1".to_string()), None]],
    );
    let _ = load_table(&mut sink, "notes", &data, &LoadOptions::default());

    let n: i64 = sink
        .connection()
        .query_row("SELECT COUNT(*) FROM notes WHERE note IS NULL", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 1);
}
