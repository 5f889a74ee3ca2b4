//! ledgerkeep - Terminal-based personal bookkeeping
//!
//! This library provides the core functionality for the ledgerkeep
//! application: a local SQLite ledger of transactions, categories, budgets,
//! currencies, and classification rules, protected by a versioned JSON
//! snapshot backup/restore engine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, etc.)
//! - `store`: SQLite storage layer
//! - `snapshot`: Snapshot documents, serializer, and validator
//! - `backup`: Backup manager, restore engine, transfer, retention policy
//! - `export`: CSV export
//! - `cli`: CLI command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerkeep::backup::{BackupManager, RestoreEngine};
//! use ledgerkeep::config::paths::LedgerPaths;
//! use ledgerkeep::store::Store;
//!
//! let paths = LedgerPaths::new()?;
//! paths.ensure_directories()?;
//! let mut store = Store::open(&paths.db_file())?;
//!
//! let manager = BackupManager::new(&paths);
//! let info = manager.create_backup(&store, None)?;
//!
//! // Later, restore from it
//! let report = RestoreEngine::new(&mut store).restore_from_file(&info.path)?;
//! println!("{}", report.summary());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod snapshot;
pub mod store;

pub use error::{LedgerError, LedgerResult};
