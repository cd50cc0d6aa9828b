//! Product records and create-request validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use palisade_core::{Price, ProductId, ProductSnapshot};

/// A catalog product as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Serialized as two-decimal text, e.g. `"45.00"`.
    pub price: Price,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The fields a cart needs to add this product.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price.to_string(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Create-product request body, before validation.
///
/// `price` is kept as raw JSON so a numeric (non-string) price can be told
/// apart from a missing one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Validation failures for [`CreateProductRequest`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name and price are required")]
    MissingFields,
    #[error("Price must be a positive numeric string")]
    InvalidPrice,
}

/// A validated product ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    /// Normalized to two decimal places.
    pub price: Price,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ValidationError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        let name = request
            .name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingFields)?;

        let price = match request.price {
            None | Some(serde_json::Value::Null) => return Err(ValidationError::MissingFields),
            Some(serde_json::Value::String(raw)) if raw.is_empty() => {
                return Err(ValidationError::MissingFields);
            }
            Some(serde_json::Value::String(raw)) => {
                Price::parse(&raw).map_err(|_| ValidationError::InvalidPrice)?
            }
            Some(_) => return Err(ValidationError::InvalidPrice),
        };

        if !price.is_positive() {
            return Err(ValidationError::InvalidPrice);
        }

        Ok(Self {
            name,
            description: request.description,
            price: price.normalized(),
            image_url: request.image_url,
            category: request.category,
            in_stock: request.in_stock.unwrap_or(true),
        })
    }
}
