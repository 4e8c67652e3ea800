//! Response record types.
//!
//! One struct per response shape. The stores map raw rows into these in a
//! single place each, so column order never leaks past the store crate.

use serde::{Deserialize, Serialize};

/// One observation: visits to a point of interest on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
  pub id:           i64,
  /// ISO 8601 calendar date (`YYYY-MM-DD`), kept as stored.
  pub date:         String,
  pub poi_name:     String,
  pub poi_category: Option<String>,
  pub dma:          Option<String>,
  pub visits:       u64,
}

/// A grouped summary row: all matching visits for one POI name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiSummary {
  pub poi_name:     String,
  pub total_visits: u64,
}

/// A record as handed to a bulk load, before the store assigns its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisit {
  pub date:         String,
  pub poi_name:     String,
  pub poi_category: Option<String>,
  pub dma:          Option<String>,
  pub visits:       u64,
}
