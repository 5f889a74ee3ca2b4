//! Transfer adapter
//!
//! Moves snapshot files across the boundary between the backup directory and
//! the outside world. Exports copy a backup to a destination directory;
//! imports validate an external file before copying it into the backup
//! directory. Source files are never mutated.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::snapshot::{is_valid_snapshot, strip_bom, Snapshot};

use super::manager::BackupManager;

/// An externally supplied backup accepted into the backup directory
#[derive(Debug)]
pub struct ImportedBackup {
    /// Name of the file created in the backup directory
    pub file_name: String,
    /// Full path of the accepted copy
    pub path: PathBuf,
    /// The parsed snapshot, for optional immediate restore
    pub snapshot: Snapshot,
}

/// Copy a backup file to an outside destination directory
///
/// The destination must be an existing directory; the source file is copied,
/// never moved or modified.
pub fn export_backup(backup_path: &Path, dest_dir: &Path) -> LedgerResult<PathBuf> {
    if !dest_dir.is_dir() {
        return Err(LedgerError::Io(format!(
            "Destination is not an available directory: {}",
            dest_dir.display()
        )));
    }

    let file_name = backup_path
        .file_name()
        .ok_or_else(|| LedgerError::Io(format!("Not a file: {}", backup_path.display())))?;
    let dest = dest_dir.join(file_name);

    fs::copy(backup_path, &dest)
        .map_err(|e| LedgerError::Io(format!("Failed to export backup: {}", e)))?;

    log::info!("exported {} to {}", backup_path.display(), dest.display());
    Ok(dest)
}

/// Import an external snapshot file into the backup directory
///
/// The file is parsed and validated first; an invalid file is rejected
/// without copying anything. Accepted files are copied under a generated
/// `imported_<timestamp>.json` name.
pub fn import_backup(manager: &BackupManager, source: &Path) -> LedgerResult<ImportedBackup> {
    let text = fs::read_to_string(source)
        .map_err(|e| LedgerError::Io(format!("Failed to read import file: {}", e)))?;

    let doc: Value = serde_json::from_str(strip_bom(&text))
        .map_err(|e| LedgerError::Json(format!("Failed to parse import file: {}", e)))?;

    if !is_valid_snapshot(&doc) {
        return Err(LedgerError::Validation(
            "Invalid backup file: missing version or data".into(),
        ));
    }

    let snapshot: Snapshot = serde_json::from_value(doc)
        .map_err(|e| LedgerError::Json(format!("Failed to decode snapshot: {}", e)))?;

    manager.ensure_backup_dir()?;

    let now = Utc::now();
    let file_name = format!(
        "imported_{}_{:03}.json",
        now.format("%Y%m%d_%H%M%S"),
        now.timestamp_subsec_millis()
    );
    let path = manager.backup_dir().join(&file_name);

    fs::copy(source, &path)
        .map_err(|e| LedgerError::Io(format!("Failed to copy import into backups: {}", e)))?;

    log::info!("imported {} as {}", source.display(), file_name);

    Ok(ImportedBackup {
        file_name,
        path,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::snapshot::serialize_store;
    use crate::store::Store;
    use tempfile::TempDir;

    fn test_manager(temp: &TempDir) -> BackupManager {
        let paths = LedgerPaths::with_base_dir(temp.path().to_path_buf());
        BackupManager::new(&paths)
    }

    #[test]
    fn test_export_copies_file() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let store = Store::open_in_memory().unwrap();
        let info = manager.create_backup(&store, Some("out")).unwrap();

        let dest_dir = TempDir::new().unwrap();
        let exported = export_backup(&info.path, dest_dir.path()).unwrap();

        assert!(exported.exists());
        assert!(info.path.exists());
        assert_eq!(
            fs::read_to_string(&exported).unwrap(),
            fs::read_to_string(&info.path).unwrap()
        );
    }

    #[test]
    fn test_export_to_missing_destination_fails() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let store = Store::open_in_memory().unwrap();
        let info = manager.create_backup(&store, Some("out")).unwrap();

        let err = export_backup(&info.path, &temp.path().join("nowhere")).unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }

    #[test]
    fn test_import_valid_file() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);

        let store = Store::open_in_memory().unwrap();
        let snapshot = serialize_store(&store);

        let outside = TempDir::new().unwrap();
        let source = outside.path().join("from_phone.json");
        let original = snapshot.to_file_contents().unwrap();
        fs::write(&source, &original).unwrap();

        let imported = import_backup(&manager, &source).unwrap();

        assert!(imported.file_name.starts_with("imported_"));
        assert!(imported.path.starts_with(manager.backup_dir()));
        assert_eq!(imported.snapshot.version, snapshot.version);

        // Source is untouched
        assert_eq!(fs::read_to_string(&source).unwrap(), original);
        // The copy is listed as a valid backup
        let listed = manager.list_backups().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].is_invalid);
    }

    #[test]
    fn test_import_rejects_invalid_file_without_copying() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);

        let outside = TempDir::new().unwrap();
        let source = outside.path().join("junk.json");
        fs::write(&source, r#"{"version": "1.0"}"#).unwrap();

        let err = import_backup(&manager, &source).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(manager.list_backups().unwrap().len(), 0);
    }

    #[test]
    fn test_import_rejects_unparsable_file() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);

        let outside = TempDir::new().unwrap();
        let source = outside.path().join("junk.json");
        fs::write(&source, "garbage").unwrap();

        let err = import_backup(&manager, &source).unwrap_err();
        assert!(matches!(err, LedgerError::Json(_)));
        assert_eq!(manager.list_backups().unwrap().len(), 0);
    }
}
