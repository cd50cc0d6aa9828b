//! Cart route handlers.
//!
//! The cart lives in the visitor's session (see [`SessionCart`]). Every
//! mutating handler responds with the updated [`CartView`].

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use palisade_core::{CartLineItem, CartStorage, CartStore, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::SessionCart;
use crate::state::AppState;

/// A cart line as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartLineItem,
    pub line_total: String,
}

/// Cart contents and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u64,
    pub total_price: String,
}

impl<S: CartStorage> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    line_total: item.line_total().to_string(),
                    item: item.clone(),
                })
                .collect(),
            total_items: cart.total_item_count(),
            total_price: cart.total_price().to_string(),
        }
    }
}

/// Header badge count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Set-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Write the cart back to the session and render it.
async fn respond(cart: &SessionCart) -> Result<Json<CartView>> {
    cart.commit().await?;
    Ok(Json(CartView::from(cart.cart())))
}

/// Display cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = SessionCart::load(session).await?;
    respond(&cart).await
}

/// Header badge count (total units in the cart).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = SessionCart::load(session).await?;
    cart.commit().await?;
    Ok(Json(CartCount {
        count: cart.cart().total_item_count(),
    }))
}

/// Add one unit of a catalog product.
///
/// The product's current name and price are captured on first add; later
/// adds only bump the quantity.
#[instrument(skip(state, session, payload))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(request) = payload?;

    let product = state
        .catalog()
        .find(&request.product_id)
        .await
        .map_err(AppError::catalog("Failed to load product"))?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = SessionCart::load(session).await?;
    cart.cart_mut().add_item(product.snapshot());

    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product.id.as_str())]),
    );
    respond(&cart).await
}

/// Set a line's quantity. Zero or less removes the line.
#[instrument(skip(session, payload))]
pub async fn update(
    session: Session,
    Path(product_id): Path<ProductId>,
    payload: std::result::Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(request) = payload?;

    let mut cart = SessionCart::load(session).await?;
    cart.cart_mut().set_quantity(&product_id, request.quantity);

    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[("product_id", product_id.as_str())]),
    );
    respond(&cart).await
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let mut cart = SessionCart::load(session).await?;
    cart.cart_mut().remove_item(&product_id);

    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("product_id", product_id.as_str())]),
    );
    respond(&cart).await
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = SessionCart::load(session).await?;
    cart.cart_mut().clear();

    add_breadcrumb("cart", "Cleared cart", None);
    respond(&cart).await
}
