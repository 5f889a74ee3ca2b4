//! Category model
//!
//! Categories classify transactions as either spending or income buckets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Whether a category tracks spending or income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
}

impl CategoryKind {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (unique)
    pub name: String,

    /// Expense or income
    #[serde(default)]
    pub kind: CategoryKind,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new expense category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind: CategoryKind::Expense,
            created_at: Utc::now(),
        }
    }

    /// Create a new category with an explicit kind
    pub fn with_kind(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            kind,
            ..Self::new(name)
        }
    }
}
