//! Transaction, category, and rule CLI commands

use clap::Subcommand;
use chrono::{NaiveDate, Utc};

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryKind, Money, Rule, Transaction};
use crate::store::Store;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TxCommands {
    /// Record a new transaction
    #[command(allow_negative_numbers = true)]
    Add {
        /// Amount in cents (negative for outflow)
        amount: i64,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
        /// Currency code (default: from settings)
        #[arg(long)]
        currency: Option<String>,
    },
    /// List transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Mark the category as income rather than expense
        #[arg(long)]
        income: bool,
    },
    /// List categories
    List,
}

/// Classification rule subcommands
#[derive(Subcommand)]
pub enum RuleCommands {
    /// Add a keyword rule
    Add {
        /// Keyword matched against transaction notes
        keyword: String,
        /// Category assigned on match
        category: String,
    },
    /// List rules
    List,
}

/// Handle a transaction command
pub fn handle_tx_command(
    store: &Store,
    settings: &Settings,
    cmd: TxCommands,
) -> LedgerResult<()> {
    match cmd {
        TxCommands::Add {
            amount,
            category,
            date,
            note,
            currency,
        } => {
            let date = match date {
                Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .map_err(|e| LedgerError::Validation(format!("Invalid date {:?}: {}", d, e)))?,
                None => Utc::now().date_naive(),
            };
            let currency = currency.unwrap_or_else(|| settings.currency.clone());
            let note = note.unwrap_or_default();

            // Explicit category wins; otherwise try the keyword rules
            let category_id = match category {
                Some(name) => Some(
                    store
                        .find_category_by_name(&name)?
                        .ok_or_else(|| LedgerError::category_not_found(name))?
                        .id,
                ),
                None => store.classify(&note)?,
            };

            let mut txn =
                Transaction::new(date, Money::from_cents(amount), currency).with_note(note);
            if let Some(id) = category_id {
                txn = txn.with_category(id);
            }
            store.insert_transaction(&txn)?;

            println!("Recorded {} on {} ({})", txn.amount, txn.date, txn.id);
        }

        TxCommands::List { limit } => {
            let transactions = store.list_transactions()?;
            if transactions.is_empty() {
                println!("No transactions recorded.");
                return Ok(());
            }

            let categories = store.list_categories()?;
            let name_of = |id| {
                categories
                    .iter()
                    .find(|c| Some(c.id) == id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default()
            };

            for txn in transactions.iter().take(limit) {
                println!(
                    "{}  {:>12}  {:<4}  {:<16}  {}",
                    txn.date,
                    txn.amount.to_string(),
                    txn.currency,
                    name_of(txn.category_id),
                    txn.note,
                );
            }
            println!();
            println!(
                "Showing {} of {} transaction(s)",
                transactions.len().min(limit),
                transactions.len()
            );
        }
    }

    Ok(())
}

/// Handle a category command
pub fn handle_category_command(store: &Store, cmd: CategoryCommands) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::Add { name, income } => {
            let kind = if income {
                CategoryKind::Income
            } else {
                CategoryKind::Expense
            };
            let category = Category::with_kind(name, kind);
            store.insert_category(&category)?;
            println!("Added category: {} ({})", category.name, category.kind);
        }

        CategoryCommands::List => {
            let categories = store.list_categories()?;
            if categories.is_empty() {
                println!("No categories defined.");
                return Ok(());
            }
            for category in categories {
                println!("  {:<20} {}", category.name, category.kind);
            }
        }
    }

    Ok(())
}

/// Handle a rule command
pub fn handle_rule_command(store: &Store, cmd: RuleCommands) -> LedgerResult<()> {
    match cmd {
        RuleCommands::Add { keyword, category } => {
            let category = store
                .find_category_by_name(&category)?
                .ok_or_else(|| LedgerError::category_not_found(category))?;
            let rule = Rule::new(keyword, category.id);
            store.insert_rule(&rule)?;
            println!("Added rule: {:?} -> {}", rule.keyword, category.name);
        }

        RuleCommands::List => {
            let rules = store.list_rules()?;
            if rules.is_empty() {
                println!("No rules defined.");
                return Ok(());
            }
            let categories = store.list_categories()?;
            for rule in rules {
                let name = categories
                    .iter()
                    .find(|c| c.id == rule.category_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                println!("  {:?} -> {}", rule.keyword, name);
            }
        }
    }

    Ok(())
}
