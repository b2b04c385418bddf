//! Monetary amounts with decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its ISO 4217 currency code.
///
/// Amounts use [`Decimal`] so that arithmetic on prices is exact. The
/// currency code is an open string because the remote commerce API returns
/// arbitrary ISO codes (NOK, SEK, ...), not a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., kroner, not øre).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// The amount multiplied by a quantity, in the same currency.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code.clone(),
        }
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_times() {
        let unit = Money::new(Decimal::new(1000, 2), "NOK");
        let total = unit.times(2);
        assert_eq!(total.amount, Decimal::new(2000, 2));
        assert_eq!(total.currency_code, "NOK");
    }

    #[test]
    fn test_display() {
        let price = Money::new(Decimal::new(199, 1), "USD");
        assert_eq!(price.to_string(), "19.90 USD");
    }

    #[test]
    fn test_serde_amount_as_string() {
        let price = Money::new(Decimal::new(2000, 2), "NOK");
        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["amount"], "20.00");
        assert_eq!(json["currency_code"], "NOK");
    }
}
