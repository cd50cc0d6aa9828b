//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// The product fields a presentation layer hands to the cart when adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub name: String,
    /// Decimal amount as text, exactly as the catalog served it.
    pub unit_price: String,
    pub image_url: Option<String>,
}

/// One distinct product in the cart and how many of it were requested.
///
/// `unit_price` stays a string: it is the persisted currency representation
/// and is only turned into a number through [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Always >= 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    /// Start a new line with a quantity of one.
    #[must_use]
    pub fn from_snapshot(product: ProductSnapshot) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            unit_price: product.unit_price,
            image_url: product.image_url,
            quantity: 1,
        }
    }

    /// Parsed unit price; an unparsable price counts as zero.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::parse_or_zero(&self.unit_price)
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}
