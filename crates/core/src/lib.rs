//! Core types and shared functionality for digiglass.
//!
//! This crate provides:
//! - The `CategoryRecord` domain model
//! - Expiring category cache with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{ALL_CATEGORIES_KEY, CacheDb, keyword_key};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::CategoryRecord;
