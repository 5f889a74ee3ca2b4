//! Restore engine
//!
//! Replaces the restorable tables with a snapshot's contents inside one
//! transaction. Rows are replayed verbatim, original primary keys included,
//! so cross-table references keep resolving after the restore. Any failure
//! rolls the whole transaction back; the store is left exactly as it was.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::snapshot::{is_valid_snapshot, strip_bom, Snapshot};
use crate::store::{rows, schema, Store};

/// Result of a completed restore
#[derive(Debug, Clone)]
pub struct RestoreReport {
    /// When the restore finished
    pub finished_at: DateTime<Utc>,
    /// Tables repopulated, with row counts, in restore order
    pub restored: Vec<(String, usize)>,
    /// Restorable tables the snapshot had no entry for; left untouched
    pub skipped: Vec<String>,
}

impl RestoreReport {
    /// Total number of rows written
    pub fn row_count(&self) -> usize {
        self.restored.iter().map(|(_, n)| n).sum()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        let tables: Vec<&str> = self.restored.iter().map(|(t, _)| t.as_str()).collect();
        format!(
            "Restored {} rows across {} tables: {}",
            self.row_count(),
            self.restored.len(),
            tables.join(", ")
        )
    }
}

/// Restores snapshots into a store
pub struct RestoreEngine<'a> {
    store: &'a mut Store,
    preserved: HashSet<String>,
}

impl<'a> RestoreEngine<'a> {
    /// Create a new RestoreEngine with the default preserved tables
    pub fn new(store: &'a mut Store) -> Self {
        Self {
            store,
            preserved: schema::PRESERVED_TABLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// Override the set of tables a restore never touches
    pub fn with_preserved_tables(mut self, tables: &[&str]) -> Self {
        self.preserved = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Restore from a snapshot file
    ///
    /// Parse and validation failures are reported without any store
    /// mutation. Once the transaction begins, it runs to commit or rollback.
    pub fn restore_from_file(&mut self, path: &Path) -> LedgerResult<RestoreReport> {
        let text = fs::read_to_string(path)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup file: {}", e)))?;

        let doc: Value = serde_json::from_str(strip_bom(&text))
            .map_err(|e| LedgerError::Json(format!("Failed to parse backup file: {}", e)))?;

        if !is_valid_snapshot(&doc) {
            return Err(LedgerError::Validation(
                "Invalid backup format: missing version or data".into(),
            ));
        }

        let snapshot: Snapshot = serde_json::from_value(doc)
            .map_err(|e| LedgerError::Json(format!("Failed to decode snapshot: {}", e)))?;

        self.restore_snapshot(&snapshot)
    }

    /// Restore from an already-parsed snapshot
    pub fn restore_snapshot(&mut self, snapshot: &Snapshot) -> LedgerResult<RestoreReport> {
        for table in &snapshot.unavailable_tables {
            log::warn!(
                "backup has no {} data (table was unreadable when the backup was taken)",
                table
            );
        }

        // Restore order: preserved tables are skipped entirely; tables absent
        // from the snapshot are skipped so they cannot be cleared without
        // being repopulated.
        let (present, skipped): (Vec<&str>, Vec<&str>) = schema::ALL_TABLES
            .iter()
            .copied()
            .filter(|t| !self.preserved.contains(*t))
            .partition(|t| snapshot.data.contains_key(*t));

        for table in &skipped {
            log::warn!("snapshot has no entry for table {}, leaving it untouched", table);
        }

        let tx = self.store.conn_mut().transaction()?;

        // Clear children before parents, repopulate parents before children.
        for table in present.iter().rev() {
            tx.execute(&format!("DELETE FROM \"{}\"", table), [])?;
        }

        let mut restored = Vec::with_capacity(present.len());
        for table in &present {
            let table_rows = &snapshot.data[*table];
            for row in table_rows {
                rows::insert_row(&tx, table, row)?;
            }
            restored.push((table.to_string(), table_rows.len()));
        }

        tx.commit()?;

        let report = RestoreReport {
            finished_at: Utc::now(),
            restored,
            skipped: skipped.iter().map(|t| t.to_string()).collect(),
        };
        log::info!("{}", report.summary());
        Ok(report)
    }
}
