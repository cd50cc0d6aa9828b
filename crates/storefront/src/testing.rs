//! Router test harness: in-memory catalog and sessions, one cookie jar.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use palisade_core::Price;

use crate::catalog::{MemoryCatalog, NewProduct, ProductCatalog};
use crate::config::StorefrontConfig;
use crate::state::AppState;

/// A router plus the session cookie of a single simulated browser.
pub struct TestApp {
    router: Router,
    catalog: Arc<MemoryCatalog>,
    cookie: Mutex<Option<String>>,
}

impl TestApp {
    /// App over an empty catalog.
    pub fn empty() -> Self {
        Self::with_catalog(MemoryCatalog::new())
    }

    /// App over a small fence catalog: one `wood` product, three `vinyl`.
    pub async fn seeded() -> Self {
        let catalog = MemoryCatalog::new();
        for (name, price, category) in [
            ("Vinyl Picket", "45.00", "vinyl"),
            ("Cedar Board", "35.00", "wood"),
            ("Vinyl Privacy", "80.00", "vinyl"),
            ("Vinyl Accent", "30.00", "vinyl"),
        ] {
            catalog
                .create(NewProduct {
                    name: name.to_string(),
                    description: None,
                    price: Price::parse(price).unwrap(),
                    image_url: None,
                    category: Some(category.to_string()),
                    in_stock: true,
                })
                .await
                .unwrap();
        }
        Self::with_catalog(catalog)
    }

    fn with_catalog(catalog: MemoryCatalog) -> Self {
        let config =
            StorefrontConfig::with_database_url(SecretString::from("postgres://localhost/test"));
        let catalog = Arc::new(catalog);
        let state = AppState::new(config, Arc::clone(&catalog) as Arc<dyn ProductCatalog>);

        Self {
            router: crate::app(state, MemoryStore::default()),
            catalog,
            cookie: Mutex::new(None),
        }
    }

    /// The catalog behind the router, for writes that bypass HTTP.
    pub fn catalog(&self) -> &MemoryCatalog {
        &self.catalog
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    /// Send a request with an optional JSON body, keeping the session cookie.
    ///
    /// Non-JSON response bodies come back as a JSON string.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = self.cookie.lock().unwrap().clone() {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            *self.cookie.lock().unwrap() = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }
}
