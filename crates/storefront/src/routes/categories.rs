//! Category listing handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Distinct product categories in ascending order.
///
/// Read from the catalog on every call, so products written by other
/// processes (e.g. `palisade seed`) show up immediately.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let categories = state
        .catalog()
        .categories()
        .await
        .map_err(AppError::catalog("Failed to load categories"))?;

    Ok(Json(categories))
}
