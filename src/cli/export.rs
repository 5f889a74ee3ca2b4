//! Export CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::export_transactions_csv;
use crate::store::Store;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export transactions to a CSV file
    Csv {
        /// Output file path
        file: PathBuf,
    },
}

/// Handle an export command
pub fn handle_export_command(store: &Store, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Csv { file } => {
            let out = File::create(&file)
                .map_err(|e| LedgerError::Io(format!("Failed to create {}: {}", file.display(), e)))?;
            let mut writer = BufWriter::new(out);
            export_transactions_csv(store, &mut writer)?;
            println!("Exported transactions to: {}", file.display());
        }
    }

    Ok(())
}
