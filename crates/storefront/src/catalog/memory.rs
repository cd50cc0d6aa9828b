//! In-memory catalog for tests and local demos.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use palisade_core::ProductId;

use super::{NewProduct, Product, ProductCatalog, ProductFilter};
use crate::db::RepositoryError;

/// A [`ProductCatalog`] backed by a `Vec` behind a `RwLock`.
///
/// Data is lost when the catalog is dropped.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let created = Product {
            id: ProductId::generate(),
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
            in_stock: product.in_stock,
            created_at: Utc::now(),
        };
        self.products.write().await.push(created.clone());
        Ok(created)
    }

    async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let products = self.products.read().await;
        let distinct: BTreeSet<&String> = products
            .iter()
            .filter_map(|p| p.category.as_ref())
            .collect();
        Ok(distinct.into_iter().cloned().collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use palisade_core::Price;

    use super::*;
    use crate::catalog::{CatalogQuery, PriceFilterMode};

    fn new_product(name: &str, price: &str, category: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: Price::parse(price).unwrap(),
            image_url: None,
            category: category.map(String::from),
            in_stock: true,
        }
    }

    async fn seeded() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        for (name, price, category) in [
            ("Vinyl Picket", "45.00", Some("vinyl")),
            ("Cedar Board", "35.00", Some("wood")),
            ("Vinyl Privacy", "80.00", Some("vinyl")),
            ("Chain Link Roll", "60.00", None),
            ("Vinyl Accent", "30.00", Some("vinyl")),
        ] {
            catalog
                .create(new_product(name, price, category))
                .await
                .unwrap();
        }
        catalog
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let catalog = seeded().await;
        let names: Vec<String> = catalog
            .list(&ProductFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(
            names,
            [
                "Cedar Board",
                "Chain Link Roll",
                "Vinyl Accent",
                "Vinyl Picket",
                "Vinyl Privacy"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_with_category_and_range() {
        let catalog = seeded().await;
        let filter = ProductFilter::from_query(
            CatalogQuery {
                category: Some("vinyl".to_string()),
                min_price: Some("30".to_string()),
                max_price: Some("70".to_string()),
            },
            PriceFilterMode::Numeric,
        );

        let products = catalog.list(&filter).await.unwrap();

        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.category.as_deref() == Some("vinyl")));
        assert!(products.iter().all(|p| {
            p.price >= Price::from_cents(3_000) && p.price <= Price::from_cents(7_000)
        }));
    }

    #[tokio::test]
    async fn test_categories_are_distinct_sorted_and_non_null() {
        let catalog = seeded().await;
        assert_eq!(catalog.categories().await.unwrap(), ["vinyl", "wood"]);
    }

    #[tokio::test]
    async fn test_find() {
        let catalog = seeded().await;
        let first = catalog
            .list(&ProductFilter::default())
            .await
            .unwrap()
            .remove(0);

        assert_eq!(catalog.find(&first.id).await.unwrap(), Some(first));
        assert_eq!(catalog.find(&ProductId::new("missing")).await.unwrap(), None);
    }
}
