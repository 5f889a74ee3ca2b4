//! Database schema and canonical table lists

/// All tables captured in a snapshot, in foreign-key-safe insert order
/// (referenced tables before referencing ones).
pub const ALL_TABLES: &[&str] = &[
    "users",
    "categories",
    "currencies",
    "budgets",
    "rules",
    "settings",
    "transactions",
];

/// Tables cleared and repopulated during a restore, in insert order.
/// Excludes the preserved tables.
pub const RESTORABLE_TABLES: &[&str] = &[
    "categories",
    "currencies",
    "budgets",
    "rules",
    "settings",
    "transactions",
];

/// Tables that a restore never touches. The user table carries the active
/// identity and must survive a restore.
pub const PRESERVED_TABLES: &[&str] = &["users"];

/// Schema bootstrap, idempotent.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    kind        TEXT NOT NULL DEFAULT 'expense',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS currencies (
    code        TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    symbol      TEXT NOT NULL,
    rate        REAL NOT NULL DEFAULT 1.0
);

CREATE TABLE IF NOT EXISTS budgets (
    id           TEXT PRIMARY KEY,
    category_id  TEXT REFERENCES categories(id),
    month        TEXT NOT NULL,
    amount_cents INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS rules (
    id           TEXT PRIMARY KEY,
    keyword      TEXT NOT NULL,
    category_id  TEXT NOT NULL REFERENCES categories(id)
);

CREATE TABLE IF NOT EXISTS settings (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id           TEXT PRIMARY KEY,
    category_id  TEXT REFERENCES categories(id),
    date         TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    currency     TEXT NOT NULL REFERENCES currencies(code),
    note         TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
";
