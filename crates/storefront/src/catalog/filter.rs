//! Catalog query filters.
//!
//! `GET /api/products?category=vinyl&minPrice=30&maxPrice=70`
//!
//! - `category` matches exactly; `all` (or an empty value) disables the filter.
//! - `minPrice` / `maxPrice` are inclusive bounds. Their comparison depends on
//!   [`PriceFilterMode`]: lexical on the stored two-decimal text (the legacy
//!   behaviour and the default), or numeric through [`Price`]. Which of the
//!   two is intended is still unconfirmed, so numeric is opt-in.
//!
//! Building a filter never fails: any query yields a listing.

use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use palisade_core::Price;

use super::Product;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Raw query parameters of the catalog listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

/// How price bounds are compared against stored prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilterMode {
    /// Bounds are compared as text against the stored price string.
    #[default]
    Lexical,
    /// Bounds are parsed as decimals and compared numerically. A bound that
    /// is not a number falls back to the text comparison.
    Numeric,
}

impl FromStr for PriceFilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "lexical" => Ok(Self::Lexical),
            other => Err(format!("expected 'numeric' or 'lexical', got '{other}'")),
        }
    }
}

impl fmt::Display for PriceFilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Lexical => f.write_str("lexical"),
        }
    }
}

/// One end of a price range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceBound {
    Numeric(Price),
    Lexical(String),
}

impl PriceBound {
    /// Parse a raw bound. Empty values mean "no bound".
    fn parse(param: &'static str, raw: Option<String>, mode: PriceFilterMode) -> Option<Self> {
        let raw = raw.filter(|r| !r.trim().is_empty())?;

        match mode {
            PriceFilterMode::Lexical => Some(Self::Lexical(raw)),
            PriceFilterMode::Numeric => match Price::parse(&raw) {
                Ok(price) => Some(Self::Numeric(price)),
                Err(_) => {
                    tracing::debug!(param, value = %raw, "Non-numeric price bound, comparing as text");
                    Some(Self::Lexical(raw))
                }
            },
        }
    }

    /// Whether `price` is at or above this bound.
    #[must_use]
    pub fn admits_from_below(&self, price: &Price) -> bool {
        match self {
            Self::Numeric(bound) => price >= bound,
            Self::Lexical(bound) => price.to_string().as_str() >= bound.as_str(),
        }
    }

    /// Whether `price` is at or below this bound.
    #[must_use]
    pub fn admits_from_above(&self, price: &Price) -> bool {
        match self {
            Self::Numeric(bound) => price <= bound,
            Self::Lexical(bound) => price.to_string().as_str() <= bound.as_str(),
        }
    }
}

/// A parsed catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<PriceBound>,
    pub max_price: Option<PriceBound>,
}

impl ProductFilter {
    /// Build a filter from query parameters.
    #[must_use]
    pub fn from_query(query: CatalogQuery, mode: PriceFilterMode) -> Self {
        let category = query
            .category
            .filter(|c| !c.is_empty() && c != ALL_CATEGORIES);

        Self {
            category,
            min_price: PriceBound::parse("minPrice", query.min_price, mode),
            max_price: PriceBound::parse("maxPrice", query.max_price, mode),
        }
    }

    /// Whether `product` passes every active condition.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| product.category.as_ref() == Some(c));
        let min_ok = self
            .min_price
            .as_ref()
            .is_none_or(|b| b.admits_from_below(&product.price));
        let max_ok = self
            .max_price
            .as_ref()
            .is_none_or(|b| b.admits_from_above(&product.price));

        category_ok && min_ok && max_ok
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use palisade_core::ProductId;

    use super::*;

    fn product(category: Option<&str>, price: &str) -> Product {
        Product {
            id: ProductId::generate(),
            name: "Panel".to_string(),
            description: None,
            price: Price::parse(price).unwrap(),
            image_url: None,
            category: category.map(String::from),
            in_stock: true,
            created_at: Utc::now(),
        }
    }

    fn query(category: Option<&str>, min: Option<&str>, max: Option<&str>) -> CatalogQuery {
        CatalogQuery {
            category: category.map(String::from),
            min_price: min.map(String::from),
            max_price: max.map(String::from),
        }
    }

    #[test]
    fn test_all_category_is_unfiltered() {
        let filter = ProductFilter::from_query(query(Some("all"), None, None), PriceFilterMode::default());
        assert_eq!(filter, ProductFilter::default());
        assert!(filter.matches(&product(None, "1.00")));
        assert!(filter.matches(&product(Some("wood"), "1.00")));
    }

    #[test]
    fn test_category_and_range_agree_across_modes() {
        for mode in [PriceFilterMode::Lexical, PriceFilterMode::Numeric] {
            let filter =
                ProductFilter::from_query(query(Some("vinyl"), Some("30"), Some("70")), mode);

            assert!(filter.matches(&product(Some("vinyl"), "45.00")), "{mode}");
            assert!(filter.matches(&product(Some("vinyl"), "30.00")), "{mode}");
            assert!(!filter.matches(&product(Some("vinyl"), "80.00")), "{mode}");
            assert!(!filter.matches(&product(Some("vinyl"), "29.99")), "{mode}");
            assert!(!filter.matches(&product(Some("Vinyl"), "45.00")), "{mode}");
            assert!(!filter.matches(&product(None, "45.00")), "{mode}");
        }
    }

    #[test]
    fn test_numeric_range_is_inclusive() {
        let filter = ProductFilter::from_query(
            query(None, Some("30"), Some("70")),
            PriceFilterMode::Numeric,
        );

        assert!(filter.matches(&product(None, "70.00")));
        assert!(!filter.matches(&product(None, "70.01")));
    }

    #[test]
    fn test_numeric_and_lexical_disagree_on_digit_count() {
        let cheap = product(None, "9.00");

        let numeric =
            ProductFilter::from_query(query(None, Some("30"), None), PriceFilterMode::Numeric);
        assert!(!numeric.matches(&cheap));

        // "9.00" >= "30" as text
        let lexical =
            ProductFilter::from_query(query(None, Some("30"), None), PriceFilterMode::Lexical);
        assert!(lexical.matches(&cheap));
    }

    #[test]
    fn test_lexical_is_the_default_mode() {
        assert_eq!(PriceFilterMode::default(), PriceFilterMode::Lexical);
    }

    #[test]
    fn test_non_numeric_bound_compares_as_text_in_both_modes() {
        for mode in [PriceFilterMode::Lexical, PriceFilterMode::Numeric] {
            let filter = ProductFilter::from_query(query(None, Some("cheap"), None), mode);

            assert_eq!(
                filter.min_price,
                Some(PriceBound::Lexical("cheap".to_string()))
            );
            // Digits sort before letters, so no stored price reaches "cheap"
            assert!(!filter.matches(&product(None, "45.00")));
        }

        let filter =
            ProductFilter::from_query(query(None, None, Some("lots")), PriceFilterMode::Numeric);
        assert!(filter.matches(&product(None, "999.99")));
    }

    #[test]
    fn test_empty_bounds_are_ignored() {
        let filter = ProductFilter::from_query(
            query(Some(""), Some(""), Some(" ")),
            PriceFilterMode::Numeric,
        );
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_price_filter_mode_from_str() {
        assert_eq!("Numeric".parse(), Ok(PriceFilterMode::Numeric));
        assert_eq!("lexical".parse(), Ok(PriceFilterMode::Lexical));
        assert!("other".parse::<PriceFilterMode>().is_err());
        assert_eq!(PriceFilterMode::Lexical.to_string(), "lexical");
    }
}
