//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel through the system as decimal strings (`"45.00"`), which is
//! how the catalog stores them and how cart records persist them. [`Price`] is
//! the one place those strings become numbers: every sum, product and range
//! comparison goes through it, never through ad-hoc float parsing or string
//! comparison.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits in a normalized price.
const PRICE_SCALE: u32 = 2;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    Invalid(String),
}

/// A decimal monetary amount.
///
/// ## Examples
///
/// ```
/// use palisade_core::Price;
///
/// let unit = Price::parse("10.00").unwrap();
/// assert_eq!(unit.times(2).to_string(), "20.00");
///
/// assert_eq!(Price::parse_or_zero("n/a"), Price::ZERO);
/// assert_eq!(Price::parse("12.5").unwrap().normalized().to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, PRICE_SCALE))
    }

    /// Parse a decimal string such as `"45.00"` or `" 5.5 "`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] for blank input and
    /// [`PriceError::Invalid`] for anything that is not a decimal literal.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))
    }

    /// Parse a decimal string, treating anything unparsable as zero.
    ///
    /// Cart aggregation uses this so a corrupt unit price never aborts a total.
    #[must_use]
    pub fn parse_or_zero(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::ZERO)
    }

    /// Round to two decimal places (half away from zero) with a fixed scale.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(PRICE_SCALE);
        Self(rounded)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a quantity, saturating on overflow.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized().0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert_eq!(Price::parse("10.00").unwrap(), Price::from_cents(1000));
        assert_eq!(Price::parse("5.5").unwrap(), Price::from_cents(550));
        assert_eq!(Price::parse("  45 ").unwrap(), Price::from_cents(4500));
        assert_eq!(Price::parse("-3.25").unwrap(), Price::from_cents(-325));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("12abc"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_parse_or_zero_falls_back() {
        assert_eq!(Price::parse_or_zero("free"), Price::ZERO);
        assert_eq!(Price::parse_or_zero("7.25"), Price::from_cents(725));
    }

    #[test]
    fn test_normalized_rounds_half_away_from_zero() {
        assert_eq!(Price::parse("12.5").unwrap().normalized().to_string(), "12.50");
        assert_eq!(Price::parse("0.125").unwrap().normalized().to_string(), "0.13");
        assert_eq!(Price::parse("19.994").unwrap().normalized().to_string(), "19.99");
        assert_eq!(Price::parse("3").unwrap().normalized().to_string(), "3.00");
    }

    #[test]
    fn test_comparison_is_numeric() {
        // "9.00" sorts after "10.00" as text but not as a number
        assert!(Price::parse("9.00").unwrap() < Price::parse("10.00").unwrap());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [
            Price::parse("10.00").unwrap().times(2),
            Price::parse("5.50").unwrap().times(1),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::from_cents(2550));
    }

    #[test]
    fn test_is_positive() {
        assert!(Price::parse("0.01").unwrap().is_positive());
        assert!(!Price::ZERO.is_positive());
        assert!(!Price::parse("-1").unwrap().is_positive());
    }

    #[test]
    fn test_serde_uses_normalized_string() {
        let price = Price::parse("45").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"45.00\"");

        let parsed: Price = serde_json::from_str("\"45.00\"").unwrap();
        assert_eq!(parsed, price);

        assert!(serde_json::from_str::<Price>("\"forty\"").is_err());
    }
}
