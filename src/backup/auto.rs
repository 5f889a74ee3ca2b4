//! Automatic backup retention policy
//!
//! Decides, from the most recent backup's timestamp, whether an automatic
//! backup is due. Automatic backups use the fixed name `auto_backup`, so a
//! later trigger replaces the previous automatic backup instead of
//! accumulating.

use chrono::{Duration, Utc};

use crate::error::LedgerResult;
use crate::store::Store;

use super::manager::{BackupInfo, BackupManager};

/// File stem used for automatic backups
pub const AUTO_BACKUP_NAME: &str = "auto_backup";

/// Outcome of an automatic backup check
#[derive(Debug)]
pub enum AutoBackupOutcome {
    /// A backup was created
    Created(BackupInfo),
    /// The newest backup is younger than the threshold; nothing was written
    Skipped {
        /// Age of the newest backup, in whole days
        age_days: i64,
        /// Configured threshold, in days
        threshold_days: u32,
    },
}

impl AutoBackupOutcome {
    /// Human-readable description
    pub fn describe(&self) -> String {
        match self {
            Self::Created(info) => format!("Automatic backup created: {}", info.file_name),
            Self::Skipped {
                age_days,
                threshold_days,
            } => format!(
                "Skipped: newest backup is {} day(s) old, below the {}-day threshold",
                age_days, threshold_days
            ),
        }
    }
}

/// Take an automatic backup if the newest backup is old enough
///
/// With no existing backups, one is created unconditionally.
pub fn auto_backup(
    store: &Store,
    manager: &BackupManager,
    interval_days: u32,
) -> LedgerResult<AutoBackupOutcome> {
    let newest = manager.latest_backup()?;

    if let Some(newest) = newest {
        let age = Utc::now().signed_duration_since(newest.created_at);
        if age < Duration::days(i64::from(interval_days)) {
            log::info!(
                "skipping automatic backup, newest ({}) is {} day(s) old",
                newest.file_name,
                age.num_days()
            );
            return Ok(AutoBackupOutcome::Skipped {
                age_days: age.num_days(),
                threshold_days: interval_days,
            });
        }
    }

    let info = manager.create_backup(store, Some(AUTO_BACKUP_NAME))?;
    Ok(AutoBackupOutcome::Created(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn test_env() -> (BackupManager, Store, TempDir) {
        let temp = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp.path().to_path_buf());
        let manager = BackupManager::new(&paths);
        let store = Store::open_in_memory().unwrap();
        (manager, store, temp)
    }

    fn write_backup_with_age(manager: &BackupManager, name: &str, age_days: i64) {
        manager.ensure_backup_dir().unwrap();
        let timestamp = (Utc::now() - Duration::days(age_days)).to_rfc3339();
        std::fs::write(
            manager.backup_dir().join(format!("{}.json", name)),
            format!(
                r#"{{"version": "1.0", "timestamp": "{}", "data": {{}}}}"#,
                timestamp
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_no_backups_creates_unconditionally() {
        let (manager, store, _temp) = test_env();

        let outcome = auto_backup(&store, &manager, 7).unwrap();
        match outcome {
            AutoBackupOutcome::Created(info) => {
                assert_eq!(info.file_name, "auto_backup.json");
                assert!(info.path.exists());
            }
            other => panic!("expected Created, got {:?}", other),
        }
    }

    #[test]
    fn test_recent_backup_skips() {
        let (manager, store, _temp) = test_env();
        write_backup_with_age(&manager, "recent", 1);

        let outcome = auto_backup(&store, &manager, 7).unwrap();
        match outcome {
            AutoBackupOutcome::Skipped {
                age_days,
                threshold_days,
            } => {
                assert_eq!(age_days, 1);
                assert_eq!(threshold_days, 7);
            }
            other => panic!("expected Skipped, got {:?}", other),
        }

        // Nothing new was written
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_old_backup_triggers() {
        let (manager, store, _temp) = test_env();
        write_backup_with_age(&manager, "old", 8);

        let outcome = auto_backup(&store, &manager, 7).unwrap();
        assert!(matches!(outcome, AutoBackupOutcome::Created(_)));
        assert!(manager.backup_dir().join("auto_backup.json").exists());
    }

    #[test]
    fn test_auto_backup_overwrites_previous_auto() {
        let (manager, store, _temp) = test_env();
        write_backup_with_age(&manager, AUTO_BACKUP_NAME, 30);

        auto_backup(&store, &manager, 7).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].file_name, "auto_backup.json");
        // Replaced, not stale: the new snapshot is recent
        let age = Utc::now().signed_duration_since(backups[0].created_at);
        assert!(age.num_days() < 1);
    }

    #[test]
    fn test_describe() {
        let outcome = AutoBackupOutcome::Skipped {
            age_days: 2,
            threshold_days: 7,
        };
        assert!(outcome.describe().contains("2 day(s)"));
    }
}
