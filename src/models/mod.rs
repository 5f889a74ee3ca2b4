//! Core data models for ledgerkeep

pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod rule;
pub mod transaction;
pub mod user;

pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use currency::Currency;
pub use ids::{BudgetId, CategoryId, RuleId, TransactionId, UserId};
pub use money::Money;
pub use rule::Rule;
pub use transaction::Transaction;
pub use user::User;
