//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library layer.

pub mod backup;
pub mod export;
pub mod ledger;

pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportCommands};
pub use ledger::{
    handle_category_command, handle_rule_command, handle_tx_command, CategoryCommands,
    RuleCommands, TxCommands,
};

use std::io::{self, BufRead, Write};

use crate::error::{LedgerError, LedgerResult};

/// Ask the user for a yes/no confirmation on stdin
///
/// Declining maps to [`LedgerError::Canceled`], which callers report as an
/// aborted action rather than a failure.
pub fn confirm(prompt: &str) -> LedgerResult<()> {
    print!("{} [y/N] ", prompt);
    io::stdout()
        .flush()
        .map_err(|e| LedgerError::Io(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| LedgerError::Io(e.to_string()))?;

    if line.trim().eq_ignore_ascii_case("y") {
        Ok(())
    } else {
        Err(LedgerError::Canceled)
    }
}
