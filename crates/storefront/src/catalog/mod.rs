//! Product catalog.
//!
//! The catalog is the storefront's product data source. Route handlers talk to
//! it through the [`ProductCatalog`] trait so the same handlers run against
//! `PostgreSQL` ([`crate::db::PgCatalog`]) in production and against
//! [`MemoryCatalog`] in tests.
//!
//! # Price handling
//!
//! Prices are stored as two-decimal text. Writes normalize through
//! [`palisade_core::Price`]; range filters go through [`ProductFilter`], which
//! decides how bounds compare based on [`PriceFilterMode`].

mod filter;
mod memory;
mod product;

use async_trait::async_trait;

use palisade_core::ProductId;

use crate::db::RepositoryError;

pub use filter::{CatalogQuery, PriceBound, PriceFilterMode, ProductFilter};
pub use memory::MemoryCatalog;
pub use product::{CreateProductRequest, NewProduct, Product, ValidationError};

/// Query and write access to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Products matching `filter`, ascending by name.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    /// A single product by id.
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Store a validated product and return the created record.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Distinct, non-null categories in ascending order.
    async fn categories(&self) -> Result<Vec<String>, RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
