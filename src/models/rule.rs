//! Classification rule model
//!
//! Rules map a keyword found in a transaction note to a category, so that
//! recorded transactions can be auto-classified.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, RuleId};

/// A keyword classification rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier
    pub id: RuleId,

    /// Keyword matched (case-insensitive substring) against transaction notes
    pub keyword: String,

    /// Category assigned on match
    pub category_id: CategoryId,
}

impl Rule {
    /// Create a new rule
    pub fn new(keyword: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id: RuleId::new(),
            keyword: keyword.into(),
            category_id,
        }
    }

    /// Check whether this rule matches the given text
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.keyword.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let rule = Rule::new("coffee", CategoryId::new());
        assert!(rule.matches("Morning COFFEE at the corner"));
        assert!(!rule.matches("groceries"));
    }
}
