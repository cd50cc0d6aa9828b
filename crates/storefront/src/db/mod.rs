//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `palisade_storefront`
//!
//! ## Tables
//!
//! - `storefront.product` - Product catalog (prices stored as two-decimal text)
//! - `tower_sessions.session` - Tower-sessions storage (holds the per-browser cart record)
//!
//! # Schema
//!
//! The catalog schema lives in `crates/storefront/migrations/` and is applied
//! externally (`sqlx migrate run`). The session table is created by the
//! session store when the server starts.

mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use products::PgCatalog;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
