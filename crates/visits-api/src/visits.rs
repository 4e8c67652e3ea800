//! Handlers for the paginated `/visits` and `/summary` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/visits` | Paginated rows, ordered by `id` |
//! | `GET`  | `/summary` | Paginated per-POI totals, ordered by `poi_name` |
//!
//! Both accept the query parameters in [`VisitParams`].

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use visits_core::{
  page::{DEFAULT_PAGE, DEFAULT_PER_PAGE, Page, PageRequest},
  store::{VisitFilter, VisitStore},
  visit::{PoiSummary, VisitRecord},
};

use crate::error::ApiError;

// ─── Parameters ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct VisitParams {
  /// 1-based page number. Defaults to 1.
  pub page:         Option<u64>,
  /// Page size, 1 to 100. Defaults to 10.
  pub per_page:     Option<u64>,
  pub start_date:   Option<String>,
  pub end_date:     Option<String>,
  pub poi_name:     Option<String>,
  pub poi_category: Option<String>,
  pub dma:          Option<String>,
  /// Substring of `poi_name`.
  pub search:       Option<String>,
}

impl VisitParams {
  /// Validate the pagination window; out-of-range values are rejected,
  /// never clamped.
  pub fn page_request(&self) -> Result<PageRequest, ApiError> {
    Ok(PageRequest::new(
      self.page.unwrap_or(DEFAULT_PAGE),
      self.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?)
  }

  /// Collect the filter fields. Blank values are treated as absent, since
  /// form-driven clients send every key whether or not it is filled in.
  pub fn filter(&self) -> VisitFilter {
    VisitFilter {
      start_date:   present(&self.start_date),
      end_date:     present(&self.end_date),
      poi_name:     present(&self.poi_name),
      poi_category: present(&self.poi_category),
      dma:          present(&self.dma),
      search:       present(&self.search),
    }
  }
}

fn present(value: &Option<String>) -> Option<String> {
  value
    .as_deref()
    .filter(|v| !v.trim().is_empty())
    .map(str::to_owned)
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /visits[?page=..][&per_page=..][&start_date=..][&end_date=..][&poi_name=..][&poi_category=..][&dma=..][&search=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<VisitParams>, QueryRejection>,
) -> Result<Json<Page<VisitRecord>>, ApiError>
where
  S: VisitStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(params) = query?;
  let page = params.page_request()?;
  let filter = params.filter();

  let visits = store
    .list_visits(&filter, page)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(visits))
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// `GET /summary` — same parameters as `/visits`; `total` counts POI groups.
pub async fn summary<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<VisitParams>, QueryRejection>,
) -> Result<Json<Page<PoiSummary>>, ApiError>
where
  S: VisitStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(params) = query?;
  let page = params.page_request()?;
  let filter = params.filter();

  let summary = store
    .summarize(&filter, page)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(summary))
}
