//! Token-set similarity scoring.
//!
//! Both strings are reduced to sets of lowercase alphanumeric tokens, so word
//! order and repeated words do not matter. The score compares the shared
//! tokens against each side's leftovers and keeps the best pairing, which lets
//! a short query fully match a longer category name.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").expect("invalid separator pattern"));

/// Replace each run of non-alphanumeric characters with one space and
/// lowercase the result. Leading and trailing spaces are kept.
pub fn collapse(text: &str) -> String {
    NON_ALPHANUMERIC.replace_all(text, " ").to_lowercase()
}

/// Similarity of two strings in `0..=100`, insensitive to token order and
/// duplication.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = collapse(a);
    let b = collapse(b);

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared = join(tokens_a.intersection(&tokens_b).copied());
    let with_a = join_nonempty(&shared, &join(tokens_a.difference(&tokens_b).copied()));
    let with_b = join_nonempty(&shared, &join(tokens_b.difference(&tokens_a).copied()));

    ratio(&shared, &with_a)
        .max(ratio(&shared, &with_b))
        .max(ratio(&with_a, &with_b))
}

/// Edit-distance similarity in `0..=100`. Identical strings score 100; an
/// empty side against a non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}
