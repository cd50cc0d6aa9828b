//! Integration tests for the session-backed cart API.
//!
//! Each `browser()` has its own cookie jar, so each test starts with an empty
//! cart.

use palisade_integration_tests::{
    browser, create_product, get_json, storefront_base_url, unique_category,
};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn add_to_cart(client: &Client, product_id: &str) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}/api/cart/items", storefront_base_url()))
        .json(&json!({ "productId": product_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    let status = resp.status();
    (status, resp.json().await.expect("Failed to parse JSON"))
}

fn id_of(product: &Value) -> &str {
    product["id"].as_str().expect("product id")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_cart_flow_across_requests() {
    let client = browser();
    let category = unique_category();
    let picket = create_product(&client, "Cart Picket", "45.00", &category).await;
    let board = create_product(&client, "Cart Board", "35.00", &category).await;

    add_to_cart(&client, id_of(&picket)).await;
    add_to_cart(&client, id_of(&picket)).await;
    let (status, cart) = add_to_cart(&client, id_of(&board)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["totalItems"], 3);
    assert_eq!(cart["totalPrice"], "125.00");

    let (_, count) = get_json(&client, "/api/cart/count").await;
    assert_eq!(count, json!({ "count": 3 }));

    let resp = client
        .put(format!(
            "{}/api/cart/items/{}",
            storefront_base_url(),
            id_of(&picket)
        ))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("Failed to set quantity");
    let cart: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(cart["totalItems"], 1);
    assert_eq!(cart["totalPrice"], "35.00");

    let resp = client
        .delete(format!("{}/api/cart", storefront_base_url()))
        .send()
        .await
        .expect("Failed to clear cart");
    let cart: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_carts_are_isolated_per_browser() {
    let alice = browser();
    let bob = browser();
    let product = create_product(&alice, "Isolated Post", "10.00", &unique_category()).await;

    add_to_cart(&alice, id_of(&product)).await;

    let (_, cart) = get_json(&bob, "/api/cart").await;
    assert_eq!(cart["totalItems"], 0);

    let (_, cart) = get_json(&alice, "/api/cart").await;
    assert_eq!(cart["totalItems"], 1);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_add_unknown_product_is_not_found() {
    let client = browser();
    let (status, body) = add_to_cart(&client, "no-such-product").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}
