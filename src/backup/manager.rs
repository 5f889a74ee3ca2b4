//! Backup manager
//!
//! Creates snapshot files in the backup directory and enumerates them.
//! Corrupted files stay visible in listings (flagged invalid) so they can
//! still be inspected and deleted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::snapshot::{is_valid_snapshot, serialize_store, strip_bom};
use crate::store::Store;

/// Metadata about a backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub file_name: String,
    /// Full path to the backup file
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Snapshot timestamp, or file modification time for invalid files
    pub created_at: DateTime<Utc>,
    /// Snapshot format version; `None` when the file is not a snapshot
    pub version: Option<String>,
    /// Whether the file could not be parsed as a snapshot
    pub is_invalid: bool,
}

/// Manages backup creation, listing, and deletion
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LedgerPaths) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
        }
    }

    /// Get the backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Ensure the backup directory exists. Checks before creating, so a
    /// successful first call makes later calls a no-op.
    pub fn ensure_backup_dir(&self) -> LedgerResult<()> {
        if !self.backup_dir.exists() {
            fs::create_dir_all(&self.backup_dir).map_err(|e| {
                LedgerError::Io(format!("Failed to create backup directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Create a backup of the whole store
    ///
    /// With `name`, the file is `<name>.json` (an existing file of that name
    /// is replaced); otherwise a unique timestamped name is generated.
    pub fn create_backup(&self, store: &Store, name: Option<&str>) -> LedgerResult<BackupInfo> {
        self.ensure_backup_dir()?;

        let now = Utc::now();
        let file_name = match name {
            Some(name) => format!("{}.json", name),
            None => format!(
                "backup_{}_{:03}.json",
                now.format("%Y%m%d_%H%M%S"),
                now.timestamp_subsec_millis()
            ),
        };
        let path = self.backup_dir.join(&file_name);

        let snapshot = serialize_store(store);
        let contents = snapshot
            .to_file_contents()
            .map_err(|e| LedgerError::Json(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&path, &contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write backup file: {}", e)))?;

        log::info!(
            "created backup {} ({} rows)",
            path.display(),
            snapshot.row_count()
        );

        Ok(BackupInfo {
            file_name,
            size_bytes: contents.len() as u64,
            path,
            created_at: snapshot.timestamp,
            version: Some(snapshot.version),
            is_invalid: false,
        })
    }

    /// List all backups, most recent first
    ///
    /// Files that fail to parse as snapshots are included with
    /// `is_invalid: true`, dated by file modification time.
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        self.ensure_backup_dir()?;

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| LedgerError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                backups.push(self.inspect_backup(&path)?);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Build a BackupInfo for one file
    fn inspect_backup(&self, path: &Path) -> LedgerResult<BackupInfo> {
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = fs::metadata(path)
            .map_err(|e| LedgerError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
        let size_bytes = metadata.len();
        let modified_at: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::from)
            .unwrap_or_else(|_| Utc::now());

        let parsed = fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str::<Value>(strip_bom(&text)).ok())
            .filter(is_valid_snapshot);

        let info = match parsed {
            Some(doc) => {
                let version = doc
                    .get("version")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let created_at = doc
                    .get("timestamp")
                    .and_then(Value::as_str)
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|d| d.with_timezone(&Utc))
                    .unwrap_or(modified_at);
                BackupInfo {
                    file_name,
                    path: path.to_path_buf(),
                    size_bytes,
                    created_at,
                    version,
                    is_invalid: false,
                }
            }
            None => BackupInfo {
                file_name,
                path: path.to_path_buf(),
                size_bytes,
                created_at: modified_at,
                version: None,
                is_invalid: true,
            },
        };

        Ok(info)
    }

    /// Delete a backup file
    pub fn delete_backup(&self, path: &Path) -> LedgerResult<()> {
        fs::remove_file(path)
            .map_err(|e| LedgerError::Io(format!("Failed to delete backup: {}", e)))?;
        log::info!("deleted backup {}", path.display());
        Ok(())
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> LedgerResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }

    /// Resolve a backup identifier (`latest`, a filename, or a path) to a path
    pub fn resolve(&self, ident: &str) -> LedgerResult<PathBuf> {
        if ident.eq_ignore_ascii_case("latest") {
            return self
                .latest_backup()?
                .map(|b| b.path)
                .ok_or_else(|| LedgerError::backup_not_found("latest"));
        }

        let path = PathBuf::from(ident);
        if path.exists() {
            return Ok(path);
        }

        let in_dir = self.backup_dir.join(ident);
        if in_dir.exists() {
            return Ok(in_dir);
        }

        let with_ext = self.backup_dir.join(format!("{}.json", ident));
        if with_ext.exists() {
            return Ok(with_ext);
        }

        Err(LedgerError::backup_not_found(ident))
    }
}
