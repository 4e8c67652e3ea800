//! Read-only JSON API over point-of-interest visit records.
//!
//! Exposes an axum [`Router`] backed by any [`visits_core::store::VisitStore`].
//! TLS and process concerns are the caller's responsibility.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/` | liveness message |
//! | `GET`  | `/visits` | [`visits::list`] |
//! | `GET`  | `/summary` | [`visits::summary`] |
//! | `GET`  | `/categories` | [`lookups::categories`] |
//! | `GET`  | `/dmas` | [`lookups::dmas`] |

pub mod cors;
pub mod error;
pub mod lookups;
pub mod visits;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use visits_core::store::VisitStore;

pub use error::ApiError;

/// Build the API router for `store`, without middleware.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: VisitStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(root))
    .route("/visits", get(visits::list::<S>))
    .route("/summary", get(visits::summary::<S>))
    .route("/categories", get(lookups::categories::<S>))
    .route("/dmas", get(lookups::dmas::<S>))
    .with_state(store)
}

/// [`api_router`] wrapped in request tracing and a CORS layer allowing
/// `cors_origins`.
pub fn app<S>(store: Arc<S>, cors_origins: &[String]) -> Router<()>
where
  S: VisitStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  api_router(store)
    .layer(cors::layer(cors_origins))
    .layer(TraceLayer::new_for_http())
}

/// `GET /`
async fn root() -> Json<Value> { Json(json!({ "message": "Visits API is running" })) }

// ─── Integration tests ────────────────────────────────────────────────────────
