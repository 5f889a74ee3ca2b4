//! Transaction model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The category this transaction is assigned to, if any
    pub category_id: Option<CategoryId>,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Currency code (e.g. "USD")
    pub currency: String,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, amount: Money, currency: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            category_id: None,
            date,
            amount,
            currency: currency.into(),
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Assign a category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether this transaction is an outflow
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(test_date(), Money::from_cents(-5000), "USD");
        assert!(txn.is_outflow());
        assert!(txn.category_id.is_none());
        assert_eq!(txn.currency, "USD");
    }

    #[test]
    fn test_builders() {
        let cat = CategoryId::new();
        let txn = Transaction::new(test_date(), Money::from_cents(1000), "EUR")
            .with_category(cat)
            .with_note("refund");
        assert_eq!(txn.category_id, Some(cat));
        assert_eq!(txn.note, "refund");
        assert!(!txn.is_outflow());
    }
}
