//! [`SqliteStore`] — the SQLite implementation of [`VisitStore`].

use std::path::{Path, PathBuf};

use rusqlite::{OpenFlags, OptionalExtension as _, params_from_iter, types::Value};
use visits_core::{
  page::{Page, PageRequest},
  store::{VisitFilter, VisitStore},
  visit::{NewVisit, PoiSummary, VisitRecord},
};

use crate::{
  Error, Predicate, Result,
  encode::{RawSummary, RawVisit, SUMMARY_COLUMNS, VISIT_COLUMNS, encode_bound},
  schema::{SCHEMA, TABLE},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only view over the `visits` table of a single SQLite file.
///
/// The store holds only the file location. Every read opens a fresh
/// read-only connection and drops it when the read finishes, whether it
/// succeeded or not. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

/// The free-form columns that `/categories` and `/dmas` enumerate.
#[derive(Debug, Clone, Copy)]
enum Dimension {
  Category,
  Dma,
}

impl Dimension {
  fn column(self) -> &'static str {
    match self {
      Dimension::Category => "poi_category",
      Dimension::Dma => "dma",
    }
  }
}

impl SqliteStore {
  /// Open the database at `path` and check that the `visits` table exists.
  ///
  /// The file is never created or written; a missing file or table is an
  /// error here rather than on the first request.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self {
      path: path.as_ref().to_path_buf(),
    };

    let conn = store.connect().await?;
    let found = conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
              [TABLE],
              |_| Ok(()),
            )
            .optional()?
            .is_some(),
        )
      })
      .await?;

    if !found {
      return Err(Error::MissingTable(TABLE));
    }
    tracing::debug!(path = ?store.path, "opened visits store");
    Ok(store)
  }

  pub fn path(&self) -> &Path { &self.path }

  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn =
      tokio_rusqlite::Connection::open_with_flags(self.path.clone(), flags).await?;
    Ok(conn)
  }

  /// Replace the entire contents of the `visits` table at `path` with
  /// `records`, creating the file and table if needed.
  ///
  /// Runs in one transaction, so readers see either the old set or the new
  /// one. Ids are assigned in input order starting at 1. Returns the number
  /// of rows written.
  pub async fn replace_all(
    path: impl AsRef<Path>,
    records: Vec<NewVisit>,
  ) -> Result<usize> {
    let path = path.as_ref().to_path_buf();
    let rows = records
      .into_iter()
      .enumerate()
      .map(|(i, r)| {
        let visits = i64::try_from(r.visits).map_err(|_| Error::InvalidRow {
          id:     i as i64 + 1,
          reason: format!("visit count {} exceeds storage range", r.visits),
        })?;
        Ok((r.date, r.poi_name, r.poi_category, r.dma, visits))
      })
      .collect::<Result<Vec<_>>>()?;

    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let written = conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM visits", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO visits (date, poi_name, poi_category, dma, visits)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for (date, poi_name, poi_category, dma, visits) in &rows {
            stmt.execute(rusqlite::params![date, poi_name, poi_category, dma, visits])?;
          }
        }
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    tracing::info!(rows = written, path = ?path, "replaced visit records");
    Ok(written)
  }

  async fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>> {
    let column = dimension.column();
    // Full-table scan: no filter and no pagination apply to these lookups.
    let sql = format!(
      "SELECT DISTINCT {column} FROM visits
       WHERE {column} IS NOT NULL AND {column} <> ''
       ORDER BY {column} ASC"
    );
    tracing::debug!(column, "listing distinct values");

    let conn = self.connect().await?;
    let values = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(values)
  }
}

/// Predicate values followed by the `LIMIT ? OFFSET ?` bounds.
fn paged_params(predicate: &Predicate, page: PageRequest) -> Vec<Value> {
  predicate
    .values()
    .iter()
    .cloned()
    .map(Value::Text)
    .chain([
      Value::Integer(encode_bound(page.per_page())),
      Value::Integer(encode_bound(page.offset())),
    ])
    .collect()
}

fn decode_total(total: i64) -> u64 { u64::try_from(total).unwrap_or_default() }

// ─── VisitStore impl ─────────────────────────────────────────────────────────

impl VisitStore for SqliteStore {
  type Error = Error;

  async fn list_visits(
    &self,
    filter: &VisitFilter,
    page: PageRequest,
  ) -> Result<Page<VisitRecord>> {
    let predicate = Predicate::build(filter);
    tracing::debug!(
      predicate = %predicate.sql(),
      page = page.page(),
      per_page = page.per_page(),
      "listing visits"
    );

    let conn = self.connect().await?;
    let (total, raws) = conn
      .call(move |conn| {
        let where_clause = predicate.sql();

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM visits WHERE {where_clause}"),
          params_from_iter(predicate.values()),
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {VISIT_COLUMNS} FROM visits
           WHERE {where_clause}
           ORDER BY id ASC
           LIMIT ? OFFSET ?"
        ))?;
        let rows = stmt
          .query_map(
            params_from_iter(paged_params(&predicate, page)),
            RawVisit::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let data = raws
      .into_iter()
      .map(RawVisit::into_record)
      .collect::<Result<Vec<_>>>()?;
    Ok(Page::new(page, decode_total(total), data))
  }

  async fn summarize(
    &self,
    filter: &VisitFilter,
    page: PageRequest,
  ) -> Result<Page<PoiSummary>> {
    let predicate = Predicate::build(filter);
    tracing::debug!(
      predicate = %predicate.sql(),
      page = page.page(),
      per_page = page.per_page(),
      "summarising visits"
    );

    let conn = self.connect().await?;
    let (groups, raws) = conn
      .call(move |conn| {
        let where_clause = predicate.sql();

        // Count groups the same way the page query forms them.
        let groups: i64 = conn.query_row(
          &format!(
            "SELECT COUNT(*) FROM (
               SELECT 1 FROM visits WHERE {where_clause} GROUP BY poi_name
             )"
          ),
          params_from_iter(predicate.values()),
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {SUMMARY_COLUMNS} FROM visits
           WHERE {where_clause}
           GROUP BY poi_name
           ORDER BY poi_name ASC
           LIMIT ? OFFSET ?"
        ))?;
        let rows = stmt
          .query_map(
            params_from_iter(paged_params(&predicate, page)),
            RawSummary::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((groups, rows))
      })
      .await?;

    let data = raws
      .into_iter()
      .map(RawSummary::into_summary)
      .collect::<Result<Vec<_>>>()?;
    Ok(Page::new(page, decode_total(groups), data))
  }

  async fn categories(&self) -> Result<Vec<String>> {
    self.distinct_values(Dimension::Category).await
  }

  async fn dmas(&self) -> Result<Vec<String>> {
    self.distinct_values(Dimension::Dma).await
  }
}
