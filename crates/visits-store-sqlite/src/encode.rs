//! Raw row shapes and their conversion into domain records.
//!
//! Column order is defined here once, next to the `SELECT` lists that feed
//! it, so a schema change cannot silently shift fields.

use visits_core::visit::{PoiSummary, VisitRecord};

use crate::{Error, Result};

pub const VISIT_COLUMNS: &str = "id, date, poi_name, poi_category, dma, visits";

pub struct RawVisit {
  pub id:           i64,
  pub date:         String,
  pub poi_name:     String,
  pub poi_category: Option<String>,
  pub dma:          Option<String>,
  pub visits:       i64,
}

impl RawVisit {
  /// Read a row selected with [`VISIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      date:         row.get(1)?,
      poi_name:     row.get(2)?,
      poi_category: row.get(3)?,
      dma:          row.get(4)?,
      visits:       row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<VisitRecord> {
    Ok(VisitRecord {
      id:           self.id,
      date:         self.date,
      poi_name:     self.poi_name,
      poi_category: self.poi_category,
      dma:          self.dma,
      visits:       decode_count(self.id, self.visits)?,
    })
  }
}

pub const SUMMARY_COLUMNS: &str = "poi_name, SUM(visits) AS total_visits";

pub struct RawSummary {
  pub poi_name:     String,
  pub total_visits: i64,
}

impl RawSummary {
  /// Read a row selected with [`SUMMARY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      poi_name:     row.get(0)?,
      total_visits: row.get(1)?,
    })
  }

  pub fn into_summary(self) -> Result<PoiSummary> {
    let total_visits =
      u64::try_from(self.total_visits).map_err(|_| Error::NegativeTotal {
        poi_name: self.poi_name.clone(),
        total:    self.total_visits,
      })?;
    Ok(PoiSummary { poi_name: self.poi_name, total_visits })
  }
}

pub fn decode_count(id: i64, visits: i64) -> Result<u64> {
  u64::try_from(visits).map_err(|_| Error::InvalidRow {
    id,
    reason: format!("negative visit count {visits}"),
  })
}

/// Clamp a `u64` pagination bound into SQLite's signed integer range.
pub fn encode_bound(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }
