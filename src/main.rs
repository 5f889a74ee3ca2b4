use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerkeep::cli::{
    handle_backup_command, handle_category_command, handle_export_command, handle_rule_command,
    handle_tx_command, BackupCommands, CategoryCommands, ExportCommands, RuleCommands, TxCommands,
};
use ledgerkeep::config::{paths::LedgerPaths, settings::Settings};
use ledgerkeep::models::{Category, CategoryKind, Currency, User};
use ledgerkeep::store::Store;

#[derive(Parser)]
#[command(
    name = "ledgerkeep",
    version,
    about = "Terminal-based personal bookkeeping with snapshot backup and restore",
    long_about = "ledgerkeep is a terminal-based personal bookkeeping tool. It keeps \
                  your transactions, categories, budgets, and classification rules in \
                  a local SQLite ledger, and protects them with versioned JSON \
                  snapshot backups that can be restored, exported, and imported."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger with default categories and currencies
    Init,

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Tx(TxCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Classification rule commands
    #[command(subcommand)]
    Rule(RuleCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Data export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    let mut store = Store::open(&paths.db_file())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ledgerkeep at: {}", paths.base_dir().display());
            seed_defaults(&store)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories and currencies have been created.");
            println!("Run 'ledgerkeep category list' to see all categories.");
        }
        Some(Commands::Tx(cmd)) => {
            handle_tx_command(&store, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&store, cmd)?;
        }
        Some(Commands::Rule(cmd)) => {
            handle_rule_command(&store, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&mut store, &paths, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&store, cmd)?;
        }
        Some(Commands::Config) => {
            println!("ledgerkeep Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Database:         {}", paths.db_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency: {}", settings.currency);
            println!(
                "  Auto-backup interval: {} day(s)",
                settings.auto_backup_interval_days
            );
        }
        None => {
            println!("ledgerkeep - Terminal-based personal bookkeeping");
            println!();
            println!("Run 'ledgerkeep --help' for usage information.");
            println!("Run 'ledgerkeep init' to set up a new ledger.");
        }
    }

    Ok(())
}

/// Seed a fresh ledger with a default user, categories, and currencies
fn seed_defaults(store: &Store) -> Result<()> {
    if store.list_users()?.is_empty() {
        store.insert_user(&User::new("default"))?;
    }

    if store.list_currencies()?.is_empty() {
        store.insert_currency(&Currency::new("USD", "US Dollar", "$"))?;
        store.insert_currency(&Currency::new("EUR", "Euro", "€").with_rate(1.08))?;
        store.insert_currency(&Currency::new("GBP", "Pound Sterling", "£").with_rate(1.27))?;
    }

    if store.list_categories()?.is_empty() {
        for name in [
            "Groceries",
            "Dining Out",
            "Transport",
            "Utilities",
            "Entertainment",
            "Household",
        ] {
            store.insert_category(&Category::new(name))?;
        }
        store.insert_category(&Category::with_kind("Salary", CategoryKind::Income))?;
    }

    Ok(())
}
