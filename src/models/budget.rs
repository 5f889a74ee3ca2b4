//! Budget model
//!
//! A budget caps spending for a category (or overall) during one month.

use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A monthly spending budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget applies to; `None` means the overall budget
    pub category_id: Option<CategoryId>,

    /// Budget month, `YYYY-MM`
    pub month: String,

    /// Budgeted amount
    pub amount: Money,
}

impl Budget {
    /// Create an overall budget for a month
    pub fn new(month: impl Into<String>, amount: Money) -> Self {
        Self {
            id: BudgetId::new(),
            category_id: None,
            month: month.into(),
            amount,
        }
    }

    /// Scope the budget to a category
    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_budget() {
        let b = Budget::new("2025-06", Money::from_cents(100_000));
        assert!(b.category_id.is_none());
        assert_eq!(b.month, "2025-06");
    }

    #[test]
    fn test_category_budget() {
        let cat = CategoryId::new();
        let b = Budget::new("2025-06", Money::from_cents(20_000)).for_category(cat);
        assert_eq!(b.category_id, Some(cat));
    }
}
