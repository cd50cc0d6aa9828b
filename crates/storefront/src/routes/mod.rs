//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness check
//! GET    /health/ready                 - Readiness check (catalog reachable)
//!
//! # Catalog
//! GET    /api/products                 - Product listing (category, minPrice, maxPrice)
//! POST   /api/products                 - Create product
//! GET    /api/categories               - Distinct categories
//!
//! # Cart (session-backed)
//! GET    /api/cart                     - Cart contents and totals
//! POST   /api/cart/items               - Add one unit of a product
//! PUT    /api/cart/items/{product_id}  - Set line quantity (<= 0 removes)
//! DELETE /api/cart/items/{product_id}  - Remove line
//! DELETE /api/cart                     - Clear cart
//! GET    /api/cart/count               - Header badge count
//! ```

pub mod cart;
pub mod categories;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::index).post(products::create))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{product_id}", put(cart::update).delete(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        // Catalog
        .nest("/api/products", product_routes())
        .route("/api/categories", get(categories::index))
        // Cart
        .nest("/api/cart", cart_routes())
}
