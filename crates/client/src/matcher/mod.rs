//! Fuzzy ranking of categories against a typed name.
//!
//! Each record is compared through its normalized projection
//! `"<parent> - <name>"` (non-alphanumeric runs collapsed to one space,
//! lowercased), never through its raw fields.

pub mod token_set;

pub use token_set::token_set_ratio;

use digiglass_core::CategoryRecord;

/// The string a record is scored against.
pub fn comparison_string(record: &CategoryRecord) -> String {
    token_set::collapse(&format!("{} - {}", record.parent, record.name))
}

/// Rank `corpus` by similarity to `query`, keeping at most `limit` records.
///
/// Equal scores keep their corpus order.
pub fn rank<'a>(query: &str, corpus: &'a [CategoryRecord], limit: usize) -> Vec<&'a CategoryRecord> {
    rank_scored(query, corpus, limit)
        .into_iter()
        .map(|(_, record)| record)
        .collect()
}

/// [`rank`] with each record's score in `0..=100`.
pub fn rank_scored<'a>(query: &str, corpus: &'a [CategoryRecord], limit: usize) -> Vec<(u8, &'a CategoryRecord)> {
    if limit == 0 || corpus.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u8, &CategoryRecord)> = corpus
        .iter()
        .map(|record| (token_set_ratio(query, &comparison_string(record)), record))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);

    tracing::debug!(query, candidates = corpus.len(), kept = scored.len(), "ranked categories");

    scored
}
