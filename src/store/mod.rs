//! SQLite data store
//!
//! The store owns the database connection, bootstraps the schema, and exposes
//! both typed accessors (`ledger`) and the generic row codec used by the
//! snapshot subsystem (`rows`).

pub mod ledger;
pub mod rows;
pub mod schema;

pub use rows::RowMap;

use std::path::Path;

use rusqlite::Connection;

use crate::error::{LedgerError, LedgerResult};

/// Handle to the ledger database
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if necessary) the database at `path`
    pub fn open(path: &Path) -> LedgerResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            LedgerError::Store(format!("Failed to open database {}: {}", path.display(), e))
        })?;
        Self::bootstrap(conn)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LedgerError::Store(format!("Failed to open in-memory database: {}", e)))?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> LedgerResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(schema::SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Shared access to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Exclusive access to the underlying connection (transactions)
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Number of rows in a table
    pub fn count_rows(&self, table: &str) -> LedgerResult<usize> {
        let all = rows::read_table_rows(&self.conn, table)?;
        Ok(all.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_schema() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(&temp_dir.path().join("ledger.db")).unwrap();

        for table in schema::ALL_TABLES {
            assert_eq!(store.count_rows(table).unwrap(), 0, "table {}", table);
        }
    }

    #[test]
    fn test_open_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.db");

        drop(Store::open(&path).unwrap());
        let store = Store::open(&path).unwrap();
        assert_eq!(store.count_rows("transactions").unwrap(), 0);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = Store::open_in_memory().unwrap();
        let result = store.conn().execute(
            "INSERT INTO rules (id, keyword, category_id) VALUES ('r1', 'x', 'missing')",
            [],
        );
        assert!(result.is_err());
    }
}
