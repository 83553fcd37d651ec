//! Monetary amounts stored as whole euro cents.

use crate::errors::ShoppingListError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<euro>\d{0,11})(?:\.(?P<cents>\d{2}))?$").unwrap());

/// A non-negative price below 10^9 euro.
///
/// There is no public way to build a `Price` from a raw cent count: callers
/// go through [`Price::create`], [`Price::euros`] or [`Price::parse`], which
/// only accept well formed euro/cent pairs. [`Price::add`] re-checks the
/// upper bound on the sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    value_in_cents: u64,
}

impl Price {
    pub const MAX_CENTS: u64 = 100_000_000_000 - 1;
    pub const MAX_EURO: u64 = Self::MAX_CENTS / 100;

    fn from_cents(value_in_cents: u64) -> Result<Self, ShoppingListError> {
        if value_in_cents > Self::MAX_CENTS {
            return Err(ShoppingListError::validation(
                "price",
                format!("must not exceed {} cents (got {})", Self::MAX_CENTS, value_in_cents),
            ));
        }
        Ok(Self { value_in_cents })
    }

    pub fn create(euro: u64, cents: u64) -> Result<Self, ShoppingListError> {
        if euro > Self::MAX_EURO {
            return Err(ShoppingListError::validation(
                "euro",
                format!("must not exceed {} (got {})", Self::MAX_EURO, euro),
            ));
        }
        if cents > 99 {
            return Err(ShoppingListError::validation(
                "cents",
                format!("must be between 0 and 99 (got {})", cents),
            ));
        }
        Self::from_cents(euro * 100 + cents)
    }

    /// Whole euro amount, zero cents.
    pub fn euros(euro: u64) -> Result<Self, ShoppingListError> {
        Self::create(euro, 0)
    }

    /// Parses `<euro>` or `<euro>.<cc>`, where the euro part has at most
    /// eleven digits and the cents part exactly two.
    pub fn parse(text: &str) -> Result<Self, ShoppingListError> {
        let caps = PRICE_PATTERN.captures(text).ok_or_else(|| {
            ShoppingListError::validation("price", format!("'{}' is not a valid price", text))
        })?;
        let euro = caps.name("euro").map(|m| m.as_str()).unwrap_or_default();
        if euro.is_empty() {
            return Err(ShoppingListError::validation(
                "price",
                format!("'{}' has no euro amount", text),
            ));
        }
        let euro = euro.parse::<u64>().map_err(|e| {
            ShoppingListError::validation("price", format!("'{}': {}", text, e))
        })?;
        let cents = match caps.name("cents") {
            Some(m) => m.as_str().parse::<u64>().map_err(|e| {
                ShoppingListError::validation("price", format!("'{}': {}", text, e))
            })?,
            None => 0,
        };
        Self::create(euro, cents)
    }

    pub fn euro(&self) -> u64 {
        self.value_in_cents / 100
    }

    pub fn cents(&self) -> u64 {
        self.value_in_cents % 100
    }

    pub fn value_in_cents(&self) -> u64 {
        self.value_in_cents
    }

    pub fn add(&self, other: &Price) -> Result<Price, ShoppingListError> {
        let sum = self
            .value_in_cents
            .checked_add(other.value_in_cents)
            .unwrap_or(u64::MAX);
        Self::from_cents(sum)
    }

    pub fn zero() -> Self {
        Self { value_in_cents: 0 }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.euro(), self.cents())
    }
}

impl FromStr for Price {
    type Err = ShoppingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = ShoppingListError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Price::parse(&value)
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_create() {
        assert_eq!(Price::parse("10.20").unwrap(), Price::create(10, 20).unwrap());
        assert_eq!(Price::parse("7").unwrap(), Price::euros(7).unwrap());
        assert_eq!(Price::parse("0.05").unwrap(), Price::create(0, 5).unwrap());
    }

    #[test]
    fn test_create_without_cents_equals_whole_euros() {
        assert_eq!(Price::create(1, 0).unwrap(), Price::euros(1).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::create(9, 99).unwrap().to_string(), "9.99");
        assert_eq!(Price::create(3, 5).unwrap().to_string(), "3.05");
        assert_eq!(Price::euros(0).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_euro_and_cents_decomposition() {
        let price = Price::parse("1234.56").unwrap();
        assert_eq!(price.euro(), 1234);
        assert_eq!(price.cents(), 56);
        assert_eq!(price.value_in_cents(), 123456);
    }

    #[test]
    fn test_add_carries_cents() {
        let sum = Price::create(9, 99).unwrap().add(&Price::create(0, 1).unwrap()).unwrap();
        assert_eq!(sum, Price::euros(10).unwrap());
    }

    #[test]
    fn test_add_rejects_overflow_of_bound() {
        let max = Price::create(Price::MAX_EURO, 99).unwrap();
        assert_eq!(max.value_in_cents(), Price::MAX_CENTS);
        assert!(max.add(&Price::create(0, 1).unwrap()).is_err());
        assert_eq!(max.add(&Price::zero()).unwrap(), max);
    }

    #[test]
    fn test_create_bounds() {
        assert!(Price::create(0, 100).is_err());
        assert!(Price::create(Price::MAX_EURO + 1, 0).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", ".50", "1.5", "1.505", "abc", "-1", "1,50", "123456789012", " 1.00"] {
            assert!(Price::parse(text).is_err(), "{:?} should be rejected", text);
        }
        // eleven digits match the pattern but exceed the euro bound
        assert!(Price::parse("10000000000").is_err());
    }

    #[test]
    fn test_prices_order_numerically() {
        let cheap = Price::parse("9.99").unwrap();
        let pricey = Price::parse("10.00").unwrap();
        assert!(cheap < pricey);
    }

    #[test]
    fn test_serde_uses_display_text() {
        let price = Price::create(12, 34).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"12.34\"");
        let back: Price = serde_json::from_str("\"12.34\"").unwrap();
        assert_eq!(back, price);
    }
}
