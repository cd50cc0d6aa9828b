//! Integration tests for the Palisade storefront.
//!
//! These tests talk to a running storefront over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! sqlx migrate run --source crates/storefront/migrations
//! cargo run -p palisade-storefront &
//! cargo test -p palisade-integration-tests -- --ignored
//! ```
//!
//! `STOREFRONT_BASE_URL` selects the server (default `http://localhost:3000`).

#![allow(clippy::missing_panics_doc)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with its own cookie jar, i.e. one browser and one cart.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A category name no other test run uses.
#[must_use]
pub fn unique_category() -> String {
    format!("it-{}", Uuid::new_v4().simple())
}

/// Create a product through the API and return the stored record.
pub async fn create_product(client: &Client, name: &str, price: &str, category: &str) -> Value {
    let resp = client
        .post(format!("{}/api/products", storefront_base_url()))
        .json(&json!({ "name": name, "price": price, "category": category }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse product")
}

/// `GET path` and parse the JSON body.
pub async fn get_json(client: &Client, path: &str) -> (StatusCode, Value) {
    let resp = client
        .get(format!("{}{path}", storefront_base_url()))
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    (status, resp.json().await.expect("Failed to parse JSON"))
}
