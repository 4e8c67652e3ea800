//! Error types for `visits-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("page must be >= 1, got {0}")]
  InvalidPage(u64),

  #[error("per_page must be between 1 and {max}, got {0}", max = crate::page::MAX_PER_PAGE)]
  InvalidPerPage(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
