//! Seed the product catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - name: Vinyl Picket
//!     price: "45.00"
//!     category: vinyl
//!     imageUrl: https://cdn.example/picket.jpg
//!   - name: Cedar Board
//!     price: "35"
//!     category: wood
//!     inStock: false
//! ```
//!
//! Prices must be quoted strings, the same rule as `POST /api/products`.
//! Every entry is validated before the database is touched.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use palisade_storefront::catalog::{CreateProductRequest, NewProduct, ProductCatalog};
use palisade_storefront::config::StorefrontConfig;
use palisade_storefront::db::{self, PgCatalog};

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<CreateProductRequest>,
}

/// Problems found in a seed file before anything is written.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} invalid products", .0.len())]
    Invalid(Vec<String>),
}

/// Parse and validate every product in a seed file.
///
/// # Errors
///
/// Returns `SeedError::Invalid` listing each rejected entry (1-based) with
/// its reason.
pub fn parse_products(content: &str) -> Result<Vec<NewProduct>, SeedError> {
    let file: SeedFile = serde_yaml::from_str(content)?;

    let mut products = Vec::with_capacity(file.products.len());
    let mut errors = Vec::new();

    for (index, request) in file.products.into_iter().enumerate() {
        let label = request.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        match NewProduct::try_from(request) {
            Ok(product) => products.push(product),
            Err(e) => errors.push(format!("#{} {label}: {e}", index + 1)),
        }
    }

    if errors.is_empty() {
        Ok(products)
    } else {
        Err(SeedError::Invalid(errors))
    }
}

/// Seed products from a YAML file into the storefront database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if database
/// operations fail.
pub async fn products(file_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %file_path.display(), "Loading products from file");
    let content = tokio::fs::read_to_string(file_path).await?;

    let products = match parse_products(&content) {
        Ok(products) => products,
        Err(SeedError::Invalid(errors)) => {
            error!("Seed file validation failed:");
            for err in &errors {
                error!("  - {err}");
            }
            return Err(SeedError::Invalid(errors).into());
        }
        Err(e) => return Err(e.into()),
    };
    info!(count = products.len(), "Seed file validated");

    let config = StorefrontConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    let catalog = PgCatalog::new(pool);
    info!("Connected to database");

    for product in products {
        let created = catalog.create(product).await?;
        info!(id = %created.id, price = %created.price, "  + {}", created.name);
    }

    info!("Seeding complete!");
    Ok(())
}
