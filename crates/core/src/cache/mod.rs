//! SQLite-backed cache for scraped category listings.
//!
//! Entries survive process restarts so that repeated CLI invocations inside
//! the TTL window never touch the network. It supports:
//!
//! - Memoization with expiry via [`CacheDb::get_or_create`]
//! - Explicit invalidation via [`CacheDb::clear`]
//! - Automatic schema migrations
//! - WAL mode so a reader never observes a half-written entry

pub mod categories;
pub mod connection;
pub mod keys;
pub mod migrations;

pub use crate::Error;

pub use categories::CacheEntry;
pub use connection::CacheDb;
pub use keys::{ALL_CATEGORIES_KEY, keyword_key};
