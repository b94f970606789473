//! Per-user currency settings and exchange rates.
//!
//! Foreign-currency income (equity vesting paid in USD, typically) is stored
//! in its original currency; conversion to the user's base currency happens
//! at read time with whatever rate is configured at that moment.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Base currency assumed when a user has not configured one.
pub const DEFAULT_BASE_CURRENCY: &str = "INR";

/// Fallback exchange rate applied when a user has no configured rate
/// for a currency.
pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(89, 0, 0, false, 0);

/// A user's base currency plus configured per-currency exchange rates.
///
/// One rate per foreign currency code, expressed as units of base currency
/// per unit of foreign currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    base_currency: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Creates a rate table for the given base currency with no
    /// configured rates.
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            rates: HashMap::new(),
        }
    }

    /// Builder-style helper for adding a rate.
    #[must_use]
    pub fn with_rate(mut self, currency: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(currency.into(), rate);
        self
    }

    /// Sets or replaces the rate for a currency.
    pub fn set_rate(&mut self, currency: impl Into<String>, rate: Decimal) {
        self.rates.insert(currency.into(), rate);
    }

    /// The user's base currency code.
    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Rate from `currency` into the base currency.
    ///
    /// The base currency itself maps to 1; unconfigured foreign currencies
    /// fall back to [`DEFAULT_EXCHANGE_RATE`].
    #[must_use]
    pub fn rate_for(&self, currency: &str) -> Decimal {
        if currency == self.base_currency {
            Decimal::ONE
        } else {
            self.rates
                .get(currency)
                .copied()
                .unwrap_or(DEFAULT_EXCHANGE_RATE)
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_currency_rate_is_one() {
        let rates = RateTable::new("INR").with_rate("USD", dec!(83.50));
        assert_eq!(rates.rate_for("INR"), Decimal::ONE);
    }

    #[test]
    fn test_configured_rate_is_used() {
        let rates = RateTable::new("INR").with_rate("USD", dec!(83.50));
        assert_eq!(rates.rate_for("USD"), dec!(83.50));
    }

    #[test]
    fn test_unconfigured_currency_falls_back_to_default() {
        let rates = RateTable::new("INR");
        assert_eq!(rates.rate_for("USD"), dec!(89));
        assert_eq!(DEFAULT_EXCHANGE_RATE, dec!(89));
    }

    #[test]
    fn test_set_rate_replaces() {
        let mut rates = RateTable::default();
        rates.set_rate("USD", dec!(89));
        rates.set_rate("USD", dec!(90));
        assert_eq!(rates.rate_for("USD"), dec!(90));
        assert_eq!(rates.base_currency(), DEFAULT_BASE_CURRENCY);
    }
}
