// src/handlers/cache.rs

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{cache::Cache, error::AppError};

/// Drops every cached content entry.
pub async fn flush(State(cache): State<Arc<dyn Cache>>) -> Result<StatusCode, AppError> {
    cache.flush_all().await?;
    tracing::info!("cache flushed");
    Ok(StatusCode::NO_CONTENT)
}

/// Drops one cached entry, e.g. `challenge-repository_get_<id>` after a content edit.
pub async fn remove(
    State(cache): State<Arc<dyn Cache>>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    cache.del(&key).await?;
    tracing::info!(key = %key, "cache entry removed");
    Ok(StatusCode::NO_CONTENT)
}
