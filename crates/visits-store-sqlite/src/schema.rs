//! SQL schema for the visits table.
//!
//! The API never creates or alters this table on its read path; the DDL is
//! run only by [`SqliteStore::replace_all`](crate::SqliteStore::replace_all).

pub const TABLE: &str = "visits";

/// Idempotent DDL for the record table and its filter indexes.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS visits (
    id           INTEGER PRIMARY KEY,
    date         TEXT    NOT NULL,   -- ISO 8601 YYYY-MM-DD
    poi_name     TEXT    NOT NULL,
    poi_category TEXT,
    dma          TEXT,
    visits       INTEGER NOT NULL CHECK (visits >= 0)
);

CREATE INDEX IF NOT EXISTS visits_date_idx     ON visits(date);
CREATE INDEX IF NOT EXISTS visits_poi_name_idx ON visits(poi_name);
";
