//! `PostgreSQL` product catalog.
//!
//! Listing builds its `WHERE` clause at runtime with `QueryBuilder` since the
//! set of active filters varies per request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use palisade_core::{Price, ProductId};

use super::RepositoryError;
use crate::catalog::{NewProduct, PriceBound, Product, ProductCatalog, ProductFilter};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image_url, category, in_stock, created_at";

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: String,
    image_url: Option<String>,
    category: Option<String>,
    in_stock: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::parse(&row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            image_url: row.image_url,
            category: row.category,
            in_stock: row.in_stock,
            created_at: row.created_at,
        })
    }
}

/// Product catalog stored in `storefront.product`.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `AND price <op> <bound>` for one end of the range.
fn push_price_bound(query: &mut QueryBuilder<'_, Postgres>, op: &str, bound: &PriceBound) {
    match bound {
        PriceBound::Numeric(price) => {
            query.push(format!(" AND price::numeric {op} "));
            query.push_bind(price.amount());
        }
        PriceBound::Lexical(raw) => {
            query.push(format!(" AND price COLLATE \"C\" {op} "));
            query.push_bind(raw.clone());
        }
    }
}

#[async_trait]
impl ProductCatalog for PgCatalog {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE TRUE"
        ));

        if let Some(category) = &filter.category {
            query.push(" AND category = ");
            query.push_bind(category.clone());
        }
        if let Some(min) = &filter.min_price {
            push_price_bound(&mut query, ">=", min);
        }
        if let Some(max) = &filter.max_price {
            push_price_bound(&mut query, "<=", max);
        }
        query.push(" ORDER BY name ASC");

        let rows: Vec<ProductRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            INSERT INTO storefront.product (id, name, description, price, image_url, category, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(ProductId::generate())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.in_stock)
        .fetch_one(&self.pool)
        .await?;

        Product::try_from(row)
    }

    async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT category
            FROM storefront.product
            WHERE category IS NOT NULL
            ORDER BY category ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
