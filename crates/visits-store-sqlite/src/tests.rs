//! Integration tests for `SqliteStore` against a temporary database file.

use tempfile::TempDir;
use visits_core::{
  page::PageRequest,
  store::{VisitFilter, VisitStore},
  visit::{NewVisit, PoiSummary},
};

use crate::{Error, SqliteStore};

struct Fixture {
  // Held so the database file outlives the test.
  _dir:  TempDir,
  store: SqliteStore,
}

fn visit(date: &str, poi: &str, cat: Option<&str>, dma: Option<&str>, visits: u64) -> NewVisit {
  NewVisit {
    date: date.into(),
    poi_name: poi.into(),
    poi_category: cat.map(Into::into),
    dma: dma.map(Into::into),
    visits,
  }
}

async fn store_with(records: Vec<NewVisit>) -> Fixture {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = dir.path().join("visits.db");
  SqliteStore::replace_all(&path, records)
    .await
    .expect("seed visits");
  let store = SqliteStore::open(&path).await.expect("open store");
  Fixture { _dir: dir, store }
}

/// The three-row dataset used throughout: two days of POI A, one of POI B.
fn sample() -> Vec<NewVisit> {
  vec![
    visit("2024-01-01", "A", Some("X"), Some("D1"), 5),
    visit("2024-01-02", "A", Some("X"), Some("D1"), 3),
    visit("2024-01-01", "B", Some("Y"), Some("D2"), 2),
  ]
}

fn page(page: u64, per_page: u64) -> PageRequest {
  PageRequest::new(page, per_page).unwrap()
}

// ─── Opening ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_missing_file_fails() {
  let dir = tempfile::tempdir().unwrap();
  let result = SqliteStore::open(dir.path().join("absent.db")).await;
  assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn open_without_visits_table_fails() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("other.db");
  let conn = tokio_rusqlite::Connection::open(&path).await.unwrap();
  conn
    .call(|conn| {
      conn.execute_batch("CREATE TABLE data (x INTEGER);")?;
      Ok(())
    })
    .await
    .unwrap();
  drop(conn);

  let result = SqliteStore::open(&path).await;
  assert!(matches!(result, Err(Error::MissingTable("visits"))));
}

#[tokio::test]
async fn replace_all_discards_previous_rows() {
  let fx = store_with(sample()).await;
  let written =
    SqliteStore::replace_all(fx.store.path(), vec![visit("2024-02-01", "C", None, None, 9)])
      .await
      .unwrap();
  assert_eq!(written, 1);

  let listed = fx
    .store
    .list_visits(&VisitFilter::default(), page(1, 10))
    .await
    .unwrap();
  assert_eq!(listed.total, 1);
  assert_eq!(listed.data[0].id, 1);
  assert_eq!(listed.data[0].poi_name, "C");
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn no_filters_returns_every_row_in_id_order() {
  let fx = store_with(sample()).await;
  let listed = fx
    .store
    .list_visits(&VisitFilter::default(), page(1, 10))
    .await
    .unwrap();

  assert_eq!(listed.total, 3);
  assert_eq!(listed.pages, 1);
  let ids: Vec<i64> = listed.data.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![1, 2, 3]);
  assert_eq!(listed.data[0].poi_category.as_deref(), Some("X"));
  assert_eq!(listed.data[0].visits, 5);
}

#[tokio::test]
async fn second_page_of_one_returns_second_row() {
  let fx = store_with(sample()).await;
  let listed = fx
    .store
    .list_visits(&VisitFilter::default(), page(2, 1))
    .await
    .unwrap();

  assert_eq!(listed.total, 3);
  assert_eq!(listed.pages, 3);
  assert_eq!(listed.data.len(), 1);
  assert_eq!(listed.data[0].id, 2);
  assert_eq!(listed.data[0].date, "2024-01-02");
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
  let fx = store_with(sample()).await;
  let listed = fx
    .store
    .list_visits(&VisitFilter::default(), page(5, 10))
    .await
    .unwrap();

  assert!(listed.data.is_empty());
  assert_eq!(listed.total, 3);
  assert_eq!(listed.pages, 1);
}

#[tokio::test]
async fn pages_are_full_until_the_last() {
  let records = (1..=7)
    .map(|d| visit(&format!("2024-03-{d:02}"), "P", None, None, d))
    .collect();
  let fx = store_with(records).await;

  let mut seen = Vec::new();
  for n in 1..=3 {
    let listed = fx
      .store
      .list_visits(&VisitFilter::default(), page(n, 3))
      .await
      .unwrap();
    assert_eq!(listed.pages, 3);
    if n < 3 {
      assert_eq!(listed.data.len(), 3);
    } else {
      assert_eq!(listed.data.len(), 1);
    }
    seen.extend(listed.data.into_iter().map(|r| r.id));
  }
  assert_eq!(seen, (1..=7).collect::<Vec<i64>>());
}

#[tokio::test]
async fn date_range_is_inclusive() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    start_date: Some("2024-01-02".into()),
    end_date: Some("2024-01-02".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&filter, page(1, 10)).await.unwrap();

  assert_eq!(listed.total, 1);
  assert_eq!(listed.data[0].date, "2024-01-02");
}

#[tokio::test]
async fn exact_match_filters_combine() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    poi_category: Some("X".into()),
    dma: Some("D1".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&filter, page(1, 10)).await.unwrap();
  assert_eq!(listed.total, 2);
  assert!(listed.data.iter().all(|r| r.poi_name == "A"));
}

#[tokio::test]
async fn name_and_search_are_both_applied() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    poi_name: Some("A".into()),
    search: Some("B".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&filter, page(1, 10)).await.unwrap();

  assert_eq!(listed.total, 0);
  assert_eq!(listed.pages, 0);
  assert!(listed.data.is_empty());
}

#[tokio::test]
async fn search_matches_substrings_literally() {
  let fx = store_with(vec![
    visit("2024-01-01", "Central Park", None, None, 1),
    visit("2024-01-01", "Park 100% Fun", None, None, 1),
    visit("2024-01-01", "Museum", None, None, 1),
  ])
  .await;

  let park = VisitFilter {
    search: Some("park".into()),
    ..Default::default()
  };
  assert_eq!(fx.store.list_visits(&park, page(1, 10)).await.unwrap().total, 2);

  let percent = VisitFilter {
    search: Some("100%".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&percent, page(1, 10)).await.unwrap();
  assert_eq!(listed.total, 1);
  assert_eq!(listed.data[0].poi_name, "Park 100% Fun");
}

#[tokio::test]
async fn injection_attempt_matches_nothing_and_keeps_table() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    poi_name: Some("A' OR '1'='1".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&filter, page(1, 10)).await.unwrap();
  assert_eq!(listed.total, 0);

  let all = fx
    .store
    .list_visits(&VisitFilter::default(), page(1, 10))
    .await
    .unwrap();
  assert_eq!(all.total, 3);
}

#[tokio::test]
async fn malformed_dates_match_nothing() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    start_date: Some("not-a-date".into()),
    ..Default::default()
  };
  let listed = fx.store.list_visits(&filter, page(1, 10)).await.unwrap();
  assert_eq!(listed.total, 0);
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn summary_groups_by_poi_name() {
  let fx = store_with(sample()).await;
  let summary = fx
    .store
    .summarize(&VisitFilter::default(), page(1, 10))
    .await
    .unwrap();

  assert_eq!(summary.total, 2);
  assert_eq!(summary.pages, 1);
  assert_eq!(
    summary.data,
    vec![
      PoiSummary { poi_name: "A".into(), total_visits: 8 },
      PoiSummary { poi_name: "B".into(), total_visits: 2 },
    ]
  );
}

#[tokio::test]
async fn summary_paginates_over_groups() {
  let fx = store_with(sample()).await;
  let second = fx
    .store
    .summarize(&VisitFilter::default(), page(2, 1))
    .await
    .unwrap();

  assert_eq!(second.total, 2);
  assert_eq!(second.pages, 2);
  assert_eq!(second.data, vec![PoiSummary { poi_name: "B".into(), total_visits: 2 }]);
}

#[tokio::test]
async fn summary_respects_filters() {
  let fx = store_with(sample()).await;
  let filter = VisitFilter {
    start_date: Some("2024-01-02".into()),
    ..Default::default()
  };
  let summary = fx.store.summarize(&filter, page(1, 10)).await.unwrap();

  assert_eq!(summary.total, 1);
  assert_eq!(summary.data, vec![PoiSummary { poi_name: "A".into(), total_visits: 3 }]);
}

#[tokio::test]
async fn summary_of_nothing_has_zero_pages() {
  let fx = store_with(Vec::new()).await;
  let summary = fx
    .store
    .summarize(&VisitFilter::default(), page(1, 10))
    .await
    .unwrap();
  assert_eq!(summary.total, 0);
  assert_eq!(summary.pages, 0);
  assert!(summary.data.is_empty());
}

// ─── Distinct values ─────────────────────────────────────────────────────────

#[tokio::test]
async fn distinct_values_skip_nulls_and_duplicates() {
  let fx = store_with(vec![
    visit("2024-01-01", "A", Some("X"), Some("D1"), 1),
    visit("2024-01-01", "B", Some("X"), None, 1),
    visit("2024-01-01", "C", None, Some("D2"), 1),
    visit("2024-01-01", "D", Some(""), Some("D1"), 1),
    visit("2024-01-01", "E", Some("W"), Some("D2"), 1),
  ])
  .await;

  assert_eq!(fx.store.categories().await.unwrap(), vec!["W", "X"]);
  assert_eq!(fx.store.dmas().await.unwrap(), vec!["D1", "D2"]);
}

#[tokio::test]
async fn distinct_values_of_empty_table() {
  let fx = store_with(Vec::new()).await;
  assert!(fx.store.categories().await.unwrap().is_empty());
  assert!(fx.store.dmas().await.unwrap().is_empty());
}

// ─── Failure propagation ─────────────────────────────────────────────────────

#[tokio::test]
async fn vanished_database_is_an_error_not_an_empty_page() {
  let fx = store_with(sample()).await;
  std::fs::remove_file(fx.store.path()).unwrap();

  let result = fx
    .store
    .list_visits(&VisitFilter::default(), page(1, 10))
    .await;
  assert!(matches!(result, Err(Error::Database(_))));
}
