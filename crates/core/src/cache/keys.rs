//! Cache key construction.
//!
//! Keys are stored verbatim. No case folding or trimming happens here, so
//! `"LED"` and `"led"` are separate entries.

/// Key for the unfiltered category index.
pub const ALL_CATEGORIES_KEY: &str = "all_categories";

/// Namespace prefix for keyword-filtered listings.
const KEYWORD_PREFIX: &str = "category.";

/// Key for the category listing filtered by `keyword`.
pub fn keyword_key(keyword: &str) -> String {
    format!("{KEYWORD_PREFIX}{keyword}")
}
