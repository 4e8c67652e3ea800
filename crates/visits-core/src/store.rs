//! The `VisitStore` trait and its filter type.
//!
//! The trait is implemented by storage backends (e.g. `visits-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  page::{Page, PageRequest},
  visit::{PoiSummary, VisitRecord},
};

// ─── Filter type ─────────────────────────────────────────────────────────────

/// The optional filter dimensions shared by `/visits` and `/summary`.
///
/// Every field is independent; an absent field narrows nothing. All present
/// fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitFilter {
  /// Inclusive lower bound on `date` (ISO `YYYY-MM-DD`).
  pub start_date:   Option<String>,
  /// Inclusive upper bound on `date`.
  pub end_date:     Option<String>,
  pub poi_name:     Option<String>,
  pub poi_category: Option<String>,
  pub dma:          Option<String>,
  /// Substring match against `poi_name`; additive with `poi_name`.
  pub search:       Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read-only access to the visit record table.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait VisitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// One page of records matching `filter`, ordered by `id` ascending.
  fn list_visits<'a>(
    &'a self,
    filter: &'a VisitFilter,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<VisitRecord>, Self::Error>> + Send + 'a;

  /// One page of per-`poi_name` visit totals over records matching `filter`,
  /// ordered by `poi_name` ascending. `total` counts groups, not rows.
  fn summarize<'a>(
    &'a self,
    filter: &'a VisitFilter,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<PoiSummary>, Self::Error>> + Send + 'a;

  /// Every distinct non-null `poi_category`. Scans the whole table.
  fn categories(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Every distinct non-null `dma`. Scans the whole table.
  fn dmas(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
