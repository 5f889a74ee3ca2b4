//! Backup system for ledgerkeep
//!
//! # Architecture
//!
//! - `BackupManager`: creates, lists, resolves, and deletes snapshot files
//!   in the backup directory
//! - `RestoreEngine`: atomically replaces the restorable tables with a
//!   snapshot's contents, rolling back entirely on any failure
//! - `transfer`: moves snapshot files across the boundary between the backup
//!   directory and the outside world (export to a destination, import with
//!   validation)
//! - `auto`: the retention policy deciding when an automatic backup is due
//!
//! Backup files are pretty-printed JSON (see [`crate::snapshot`] for the
//! document format), written once and never edited in place.

pub mod auto;
pub mod manager;
pub mod restore;
pub mod transfer;

pub use auto::{auto_backup, AutoBackupOutcome};
pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreEngine, RestoreReport};
pub use transfer::{export_backup, import_backup, ImportedBackup};
