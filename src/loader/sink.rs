//! Destination table abstraction and the SQLite implementation.
//!
//! The loader only needs "bulk append rows with an explicit column set"; any
//! relational store exposing that operation can implement [`TableSink`].

use std::path::Path;

use rusqlite::Connection;

use crate::error::{IngestError, IngestResult};
use crate::types::ExistsPolicy;

/// A destination that can receive appended text rows.
pub trait TableSink {
    /// Apply the exists-policy and make sure the table exists.
    ///
    /// Called once per file, before the first chunk. Subsequent chunks append
    /// unconditionally; re-applying `Replace` per chunk would destroy the
    /// rows committed by earlier chunks.
    fn prepare(&mut self, table: &str, columns: &[String], policy: ExistsPolicy)
    -> IngestResult<()>;

    /// Append one chunk of rows. Each row has exactly `columns.len()` cells.
    fn append_rows(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> IngestResult<()>;
}

/// [`TableSink`] backed by a SQLite database file.
///
/// All destination columns are TEXT; typing is deferred to downstream
/// migration steps. Each appended chunk runs in its own transaction, so a
/// failing chunk never leaves a partial chunk behind while earlier chunks
/// stay committed.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> IngestResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> IngestResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn table_exists(&self, table: &str) -> IngestResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn create_table(&self, table: &str, columns: &[String]) -> IngestResult<()> {
        let cols = columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            quote_ident(table),
            cols
        ))?;
        Ok(())
    }
}

impl TableSink for SqliteSink {
    fn prepare(
        &mut self,
        table: &str,
        columns: &[String],
        policy: ExistsPolicy,
    ) -> IngestResult<()> {
        match policy {
            ExistsPolicy::Append => {}
            ExistsPolicy::Replace => {
                self.conn
                    .execute_batch(&format!("DROP TABLE IF EXISTS {};", quote_ident(table)))?;
            }
            ExistsPolicy::Fail => {
                if self.table_exists(table)? {
                    return Err(IngestError::TableExists {
                        table: table.to_string(),
                    });
                }
            }
        }
        self.create_table(table, columns)
    }

    fn append_rows(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> IngestResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let col_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({col_list}) VALUES ({placeholders})",
            quote_ident(table)
        );

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

/// Double-quote an identifier, escaping embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{quote_ident, SqliteSink, TableSink};
    use crate::error::IngestError;
    use crate::types::ExistsPolicy;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn count_rows(sink: &SqliteSink, table: &str) -> i64 {
        sink.connection()
            .query_row(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)), [], |r| {
                r.get(0)
            })
            .unwrap()
    }

    #[test]
    fn append_policy_creates_missing_table_and_appends() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let columns = cols(&["id", "name"]);
        sink.prepare("t", &columns, ExistsPolicy::Append).unwrap();
        sink.append_rows("t", &columns, &[vec![Some("1".into()), None]])
            .unwrap();
        sink.prepare("t", &columns, ExistsPolicy::Append).unwrap();
        sink.append_rows("t", &columns, &[vec![Some("2".into()), Some("x".into())]])
            .unwrap();
        assert_eq!(count_rows(&sink, "t"), 2);
    }

    #[test]
    fn replace_policy_drops_existing_rows() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let columns = cols(&["id"]);
        sink.prepare("t", &columns, ExistsPolicy::Append).unwrap();
        sink.append_rows("t", &columns, &[vec![Some("1".into())]])
            .unwrap();

        sink.prepare("t", &columns, ExistsPolicy::Replace).unwrap();
        assert_eq!(count_rows(&sink, "t"), 0);
    }

    #[test]
    fn fail_policy_rejects_existing_table() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let columns = cols(&["id"]);
        sink.prepare("t", &columns, ExistsPolicy::Append).unwrap();

        let err = sink.prepare("t", &columns, ExistsPolicy::Fail).unwrap_err();
        assert!(matches!(err, IngestError::TableExists { .. }));
    }

    #[test]
    fn identifiers_with_quotes_and_spaces_are_quoted() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let columns = cols(&["first name", "odd\"col"]);
        sink.prepare("my table", &columns, ExistsPolicy::Append)
            .unwrap();
        sink.append_rows(
            "my table",
            &columns,
            &[vec![Some("Ada".into()), Some("ok".into())]],
        )
        .unwrap();
        assert_eq!(count_rows(&sink, "my table"), 1);
    }

    #[test]
    fn failed_chunk_is_fully_rolled_back() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        sink.connection()
            .execute_batch("CREATE TABLE t (id TEXT NOT NULL);")
            .unwrap();
        let columns = cols(&["id"]);

        let err = sink.append_rows("t", &columns, &[vec![Some("1".into())], vec![None]]);
        assert!(err.is_err());
        // The chunk's transaction aborted; the good row from the same chunk
        // must not linger.
        assert_eq!(count_rows(&sink, "t"), 0);
    }
}
