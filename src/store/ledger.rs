//! Typed accessors over the ledger tables
//!
//! Row mapping conventions: ids are stored as full UUID strings, dates as
//! `%Y-%m-%d`, timestamps as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Budget, BudgetId, Category, CategoryId, CategoryKind, Currency, Money, Rule, RuleId,
    Transaction, TransactionId, User, UserId,
};

use super::Store;

fn bad_row(what: &str, detail: impl std::fmt::Display) -> LedgerError {
    LedgerError::Store(format!("corrupt {} row: {}", what, detail))
}

fn parse_timestamp(s: &str) -> LedgerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| bad_row("timestamp", e))
}

fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| bad_row("date", e))
}

impl Store {
    // --- users ---

    /// Insert a user
    pub fn insert_user(&self, user: &User) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![
                user.id.storage_key(),
                user.name,
                user.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// All users, oldest first
    pub fn list_users(&self) -> LedgerResult<Vec<User>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, created_at FROM users ORDER BY created_at")?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(id, name, created_at)| {
                Ok(User {
                    id: UserId::parse(&id).map_err(|e| bad_row("user", e))?,
                    name,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    // --- categories ---

    /// Insert a category
    pub fn insert_category(&self, category: &Category) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO categories (id, name, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                category.id.storage_key(),
                category.name,
                category.kind.as_str(),
                category.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// All categories, sorted by name
    pub fn list_categories(&self) -> LedgerResult<Vec<Category>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, kind, created_at FROM categories ORDER BY name")?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(id, name, kind, created_at)| {
                Ok(Category {
                    id: CategoryId::parse(&id).map_err(|e| bad_row("category", e))?,
                    name,
                    kind: CategoryKind::parse(&kind)
                        .ok_or_else(|| bad_row("category", format!("unknown kind {:?}", kind)))?,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    /// Look up a category by name
    pub fn find_category_by_name(&self, name: &str) -> LedgerResult<Option<Category>> {
        Ok(self
            .list_categories()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    // --- currencies ---

    /// Insert a currency
    pub fn insert_currency(&self, currency: &Currency) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO currencies (code, name, symbol, rate) VALUES (?1, ?2, ?3, ?4)",
            params![currency.code, currency.name, currency.symbol, currency.rate],
        )?;
        Ok(())
    }

    /// All currencies, sorted by code
    pub fn list_currencies(&self) -> LedgerResult<Vec<Currency>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT code, name, symbol, rate FROM currencies ORDER BY code")?;
        let currencies = stmt
            .query_map([], |row| {
                Ok(Currency {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    symbol: row.get(2)?,
                    rate: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(currencies)
    }

    // --- budgets ---

    /// Insert a budget
    pub fn insert_budget(&self, budget: &Budget) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO budgets (id, category_id, month, amount_cents) VALUES (?1, ?2, ?3, ?4)",
            params![
                budget.id.storage_key(),
                budget.category_id.map(|c| c.storage_key()),
                budget.month,
                budget.amount.cents()
            ],
        )?;
        Ok(())
    }

    /// All budgets, newest month first
    pub fn list_budgets(&self) -> LedgerResult<Vec<Budget>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, category_id, month, amount_cents FROM budgets ORDER BY month DESC",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(id, category_id, month, cents)| {
                Ok(Budget {
                    id: BudgetId::parse(&id).map_err(|e| bad_row("budget", e))?,
                    category_id: category_id
                        .map(|c| CategoryId::parse(&c).map_err(|e| bad_row("budget", e)))
                        .transpose()?,
                    month,
                    amount: Money::from_cents(cents),
                })
            })
            .collect()
    }

    // --- rules ---

    /// Insert a classification rule
    pub fn insert_rule(&self, rule: &Rule) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO rules (id, keyword, category_id) VALUES (?1, ?2, ?3)",
            params![
                rule.id.storage_key(),
                rule.keyword,
                rule.category_id.storage_key()
            ],
        )?;
        Ok(())
    }

    /// All rules, in storage order
    pub fn list_rules(&self) -> LedgerResult<Vec<Rule>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, keyword, category_id FROM rules")?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(id, keyword, category_id)| {
                Ok(Rule {
                    id: RuleId::parse(&id).map_err(|e| bad_row("rule", e))?,
                    keyword,
                    category_id: CategoryId::parse(&category_id).map_err(|e| bad_row("rule", e))?,
                })
            })
            .collect()
    }

    /// Find the category for a note via the first matching rule
    pub fn classify(&self, note: &str) -> LedgerResult<Option<CategoryId>> {
        Ok(self
            .list_rules()?
            .into_iter()
            .find(|r| r.matches(note))
            .map(|r| r.category_id))
    }

    // --- transactions ---

    /// Insert a transaction
    pub fn insert_transaction(&self, txn: &Transaction) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO transactions (id, category_id, date, amount_cents, currency, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.id.storage_key(),
                txn.category_id.map(|c| c.storage_key()),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.amount.cents(),
                txn.currency,
                txn.note,
                txn.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// All transactions, newest first
    pub fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, category_id, date, amount_cents, currency, note, created_at
             FROM transactions ORDER BY date DESC, created_at DESC",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(id, category_id, date, cents, currency, note, created_at)| {
                Ok(Transaction {
                    id: TransactionId::parse(&id).map_err(|e| bad_row("transaction", e))?,
                    category_id: category_id
                        .map(|c| CategoryId::parse(&c).map_err(|e| bad_row("transaction", e)))
                        .transpose()?,
                    date: parse_date(&date)?,
                    amount: Money::from_cents(cents),
                    currency,
                    note,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    // --- settings ---

    /// Read an app-level setting
    pub fn get_setting(&self, key: &str) -> LedgerResult<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write an app-level setting
    pub fn set_setting(&self, key: &str, value: &str) -> LedgerResult<()> {
        self.conn().execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_currency(&Currency::new("USD", "US Dollar", "$"))
            .unwrap();
        store
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_transaction_round_trip() {
        let store = seeded_store();
        let cat = Category::new("Groceries");
        store.insert_category(&cat).unwrap();

        let txn = Transaction::new(test_date(), Money::from_cents(-5000), "USD")
            .with_category(cat.id)
            .with_note("weekly shop");
        store.insert_transaction(&txn).unwrap();

        let loaded = store.list_transactions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, txn.id);
        assert_eq!(loaded[0].category_id, Some(cat.id));
        assert_eq!(loaded[0].amount.cents(), -5000);
        assert_eq!(loaded[0].note, "weekly shop");
    }

    #[test]
    fn test_find_category_by_name() {
        let store = seeded_store();
        store.insert_category(&Category::new("Dining Out")).unwrap();

        assert!(store.find_category_by_name("dining out").unwrap().is_some());
        assert!(store.find_category_by_name("Missing").unwrap().is_none());
    }

    #[test]
    fn test_classify() {
        let store = seeded_store();
        let cat = Category::new("Coffee");
        store.insert_category(&cat).unwrap();
        store.insert_rule(&Rule::new("latte", cat.id)).unwrap();

        assert_eq!(store.classify("Oat Latte").unwrap(), Some(cat.id));
        assert_eq!(store.classify("bus ticket").unwrap(), None);
    }

    #[test]
    fn test_budget_round_trip() {
        let store = seeded_store();
        let cat = Category::new("Rent");
        store.insert_category(&cat).unwrap();

        let budget = Budget::new("2025-06", Money::from_cents(150_000)).for_category(cat.id);
        store.insert_budget(&budget).unwrap();

        let loaded = store.list_budgets().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, budget.id);
        assert_eq!(loaded[0].category_id, Some(cat.id));
    }

    #[test]
    fn test_settings_upsert() {
        let store = seeded_store();
        assert_eq!(store.get_setting("theme").unwrap(), None);

        store.set_setting("theme", "dark").unwrap();
        store.set_setting("theme", "light").unwrap();
        assert_eq!(store.get_setting("theme").unwrap(), Some("light".into()));
    }

    #[test]
    fn test_users_survive() {
        let store = seeded_store();
        let user = User::new("default");
        store.insert_user(&user).unwrap();

        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, user.id);
    }
}
