//! Path management for ledgerkeep
//!
//! Provides platform-appropriate path resolution for the database, settings,
//! and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGERKEEP_DATA_DIR` environment variable (if set)
//! 2. Platform data directory via `directories` (e.g. `~/.local/share/ledgerkeep`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Manages all paths used by ledgerkeep
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all ledgerkeep data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// Path resolution:
    /// 1. `LEDGERKEEP_DATA_DIR` env var (explicit override)
    /// 2. Platform data directory (`directories::ProjectDirs`)
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var("LEDGERKEEP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "ledgerkeep").ok_or_else(|| {
                LedgerError::Config("Could not determine a data directory".into())
            })?;
            dirs.data_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the SQLite database file
    pub fn db_file(&self) -> PathBuf {
        self.base_dir.join("ledger.db")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates the base directory and the backup directory.
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if ledgerkeep has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
