//! Pagination arithmetic shared by every paginated read.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// A validated `(page, per_page)` window.
///
/// Construction is the only place the range rules are checked; holding a
/// `PageRequest` means `page >= 1` and `1 <= per_page <= MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page:     u64,
  per_page: u64,
}

impl PageRequest {
  pub fn new(page: u64, per_page: u64) -> Result<Self> {
    if page < 1 {
      return Err(Error::InvalidPage(page));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
      return Err(Error::InvalidPerPage(per_page));
    }
    Ok(Self { page, per_page })
  }

  pub fn page(&self) -> u64 { self.page }

  pub fn per_page(&self) -> u64 { self.per_page }

  /// Rows to skip: `(page - 1) * per_page`, saturating for absurd pages.
  pub fn offset(&self) -> u64 { (self.page - 1).saturating_mul(self.per_page) }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page:     DEFAULT_PAGE,
      per_page: DEFAULT_PER_PAGE,
    }
  }
}

/// `ceil(total / per_page)`, or `0` when nothing matched.
pub fn page_count(total: u64, per_page: u64) -> u64 {
  if total == 0 || per_page == 0 {
    return 0;
  }
  total.div_ceil(per_page)
}

/// A result window plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub page:     u64,
  pub per_page: u64,
  pub total:    u64,
  pub pages:    u64,
  pub data:     Vec<T>,
}

impl<T> Page<T> {
  pub fn new(request: PageRequest, total: u64, data: Vec<T>) -> Self {
    Self {
      page: request.page,
      per_page: request.per_page,
      total,
      pages: page_count(total, request.per_page),
      data,
    }
  }
}
