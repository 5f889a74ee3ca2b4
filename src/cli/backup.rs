//! Backup CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{auto_backup, export_backup, import_backup, BackupManager, RestoreEngine};
use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::store::Store;

use super::confirm;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create {
        /// Optional backup name (default: timestamped)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip the pre-restore warning
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a backup
    Delete {
        /// Backup filename or path
        backup: String,
    },

    /// Copy a backup to an outside directory
    Export {
        /// Backup filename or path
        backup: String,

        /// Destination directory
        dest: PathBuf,
    },

    /// Import an external backup file
    Import {
        /// Path to the snapshot file
        file: PathBuf,

        /// Restore immediately after importing (asks for confirmation)
        #[arg(short, long)]
        restore: bool,
    },

    /// Create an automatic backup if the newest one is old enough
    Auto,
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &mut Store,
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LedgerResult<()> {
    let manager = BackupManager::new(paths);

    match cmd {
        BackupCommands::Create { name } => {
            println!("Creating backup...");
            let info = manager.create_backup(store, name.as_deref())?;
            println!("Backup created: {}", info.file_name);
            println!("Location: {}", info.path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: ledgerkeep backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let version = backup.version.as_deref().unwrap_or("invalid");
                let marker = if backup.is_invalid { " [invalid]" } else { "" };

                if verbose {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Version: {}\n   Size: {}\n",
                        i + 1,
                        backup.file_name,
                        marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        version,
                        format_size(backup.size_bytes),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}){}",
                        i + 1,
                        backup.file_name,
                        format_duration(age),
                        format_size(backup.size_bytes),
                        marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = manager.resolve(&backup)?;

            if !force {
                println!("WARNING: This will overwrite all ledger data!");
                println!("(Your user record is preserved.)");
                println!("To proceed, run again with --force flag:");
                println!("  ledgerkeep backup restore {} --force", backup);
                return Ok(());
            }

            // Keep a way back: snapshot the current data first
            println!("Creating backup of current data before restore...");
            let pre_restore = manager.create_backup(store, None)?;
            println!("Pre-restore backup saved: {}", pre_restore.file_name);
            println!();

            println!("Restoring from backup...");
            let report = RestoreEngine::new(store)
                .restore_from_file(&backup_path)
                .map_err(|e| {
                    eprintln!("Restore failed; no data was changed.");
                    e
                })?;

            println!("Restore complete!");
            println!("{}", report.summary());
            if !report.skipped.is_empty() {
                println!(
                    "Note: no data for table(s): {}",
                    report.skipped.join(", ")
                );
            }
        }

        BackupCommands::Delete { backup } => {
            let backup_path = manager.resolve(&backup)?;
            manager.delete_backup(&backup_path)?;
            println!("Deleted: {}", backup_path.display());
        }

        BackupCommands::Export { backup, dest } => {
            let backup_path = manager.resolve(&backup)?;
            let exported = export_backup(&backup_path, &dest)?;
            println!("Exported to: {}", exported.display());
        }

        BackupCommands::Import { file, restore } => {
            let imported = import_backup(&manager, &file)?;
            println!("Imported: {}", imported.file_name);
            println!("Snapshot version: {}", imported.snapshot.version);
            println!(
                "Snapshot taken: {}",
                imported.snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            );

            if restore {
                match confirm("Restore this backup now? All ledger data will be replaced.") {
                    Ok(()) => {
                        let report = RestoreEngine::new(store)
                            .restore_snapshot(&imported.snapshot)
                            .map_err(|e| {
                                eprintln!("Restore failed; no data was changed.");
                                e
                            })?;
                        println!("Restore complete!");
                        println!("{}", report.summary());
                    }
                    Err(LedgerError::Canceled) => {
                        println!(
                            "Aborted. The imported file is kept at: {}",
                            imported.path.display()
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        BackupCommands::Auto => {
            let outcome = auto_backup(store, &manager, settings.auto_backup_interval_days)?;
            println!("{}", outcome.describe());
        }
    }

    Ok(())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    format!("{}d", days)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
