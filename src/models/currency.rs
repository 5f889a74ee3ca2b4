//! Currency model

use serde::{Deserialize, Serialize};

/// A currency known to the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// ISO-style code, e.g. "USD" (primary key)
    pub code: String,

    /// Human-readable name
    pub name: String,

    /// Display symbol, e.g. "$"
    pub symbol: String,

    /// Exchange rate against the base currency
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    1.0
}

impl Currency {
    /// Create a new currency with a rate of 1.0
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
            rate: 1.0,
        }
    }

    /// Set the exchange rate
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_currency() {
        let c = Currency::new("USD", "US Dollar", "$");
        assert_eq!(c.code, "USD");
        assert_eq!(c.rate, 1.0);
    }

    #[test]
    fn test_with_rate() {
        let c = Currency::new("EUR", "Euro", "€").with_rate(1.08);
        assert_eq!(c.rate, 1.08);
    }
}
