//! CSV export functionality
//!
//! Exports transactions to CSV. Output is UTF-8 with a BOM prefix so
//! spreadsheet applications pick up the encoding.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::store::Store;

/// Export all transactions to CSV, newest first
pub fn export_transactions_csv<W: Write>(store: &Store, writer: &mut W) -> LedgerResult<()> {
    writer
        .write_all("\u{feff}".as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    let categories = store.list_categories()?;
    let category_names: HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["Id", "Date", "Category", "Amount", "Currency", "Note"])
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in store.list_transactions()? {
        let category = txn
            .category_id
            .and_then(|id| category_names.get(&id).cloned())
            .unwrap_or_default();

        wtr.write_record([
            txn.id.storage_key(),
            txn.date.format("%Y-%m-%d").to_string(),
            category,
            txn.amount.to_string(),
            txn.currency.clone(),
            txn.note.clone(),
        ])
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    wtr.flush().map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Currency, Money, Transaction};
    use chrono::NaiveDate;

    #[test]
    fn test_export_shape() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_currency(&Currency::new("USD", "US Dollar", "$"))
            .unwrap();
        let cat = Category::new("Groceries");
        store.insert_category(&cat).unwrap();
        store
            .insert_transaction(
                &Transaction::new(
                    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    Money::from_cents(-1250),
                    "USD",
                )
                .with_category(cat.id)
                .with_note("weekly shop"),
            )
            .unwrap();

        let mut out = Vec::new();
        export_transactions_csv(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with('\u{feff}'));
        let lines: Vec<&str> = text.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Id,Date,Category,Amount,Currency,Note");
        assert!(lines[1].contains("Groceries"));
        assert!(lines[1].contains("-12.50"));
        assert!(lines[1].contains("2025-06-01"));
    }

    #[test]
    fn test_export_empty_store() {
        let store = Store::open_in_memory().unwrap();
        let mut out = Vec::new();
        export_transactions_csv(&store, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines.len(), 1);
    }
}
