//! Product route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use crate::catalog::{CatalogQuery, CreateProductRequest, NewProduct, Product, ProductFilter};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// List products, optionally filtered by category and price range.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter::from_query(query, state.price_filter());

    let products = state
        .catalog()
        .list(&filter)
        .await
        .map_err(AppError::catalog("Failed to load products"))?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Create a product.
///
/// Responds `201 Created` with the stored record. The price is normalized to
/// two decimal places before it is stored.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(request) = payload?;
    let product = NewProduct::try_from(request)?;

    let created = state
        .catalog()
        .create(product)
        .await
        .map_err(AppError::catalog("Failed to create product"))?;

    tracing::info!(product_id = %created.id, name = %created.name, "Product created");
    add_breadcrumb(
        "catalog",
        "Product created",
        Some(&[("product_id", created.id.as_str())]),
    );

    Ok((StatusCode::CREATED, Json(created)))
}
