//! Error type for `visits-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The database opened but does not contain the expected table.
  #[error("table {0:?} not found in database")]
  MissingTable(&'static str),

  /// A stored value violates the record invariants (e.g. negative visits).
  #[error("invalid row {id}: {reason}")]
  InvalidRow { id: i64, reason: String },

  #[error("visit total for {poi_name:?} is negative: {total}")]
  NegativeTotal { poi_name: String, total: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
