//! Client code for digiglass.
//!
//! This crate provides the category fetch pipeline, index extraction, fuzzy
//! ranking, and the cached catalog used by the CLI.

pub mod catalog;
pub mod extract;
pub mod fetch;
pub mod matcher;

pub use catalog::{Catalog, sort_by_quantity};
pub use extract::{HtmlDocument, MarkupDocument, MarkupNode, extract_categories, extract_from};
pub use fetch::{FetchClient, FetchConfig, Fetcher, search_url};
pub use matcher::{comparison_string, rank, rank_scored};
