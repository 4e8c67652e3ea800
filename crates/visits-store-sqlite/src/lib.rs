//! SQLite backend for the visits analytics API.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each read opens its own read-only
//! connection, which is closed when it is dropped.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod filter;

pub use error::{Error, Result};
pub use filter::Predicate;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
