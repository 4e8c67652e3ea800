//! Handlers for the distinct-value lookups `/categories` and `/dmas`.
//!
//! Neither endpoint is filtered or paginated; each scans the whole table.

use std::sync::Arc;

use axum::{Json, extract::State};
use visits_core::store::VisitStore;

use crate::error::ApiError;

/// `GET /categories` — every distinct non-null `poi_category`.
pub async fn categories<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<String>>, ApiError>
where
  S: VisitStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let values = store
    .categories()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(values))
}

/// `GET /dmas` — every distinct non-null `dma`.
pub async fn dmas<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<String>>, ApiError>
where
  S: VisitStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let values = store
    .dmas()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(values))
}
