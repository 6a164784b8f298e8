//! Domain model: a scraped product category.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vendor product category as listed on the category index page.
///
/// Records are rebuilt on every extraction pass and never mutated afterwards.
/// Two passes may yield records with the same `id`; they are unrelated values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Numeric id taken from the category's product-search link.
    pub id: u64,
    /// Leaf category label, e.g. "Ceramic Capacitors".
    pub name: String,
    /// Top-level group the category belongs to, e.g. "Capacitors".
    pub parent: String,
    /// Number of listed items at scrape time.
    pub quantity: u64,
}

impl CategoryRecord {
    pub fn new(id: u64, name: impl Into<String>, parent: impl Into<String>, quantity: u64) -> Self {
        Self { id, name: name.into(), parent: parent.into(), quantity }
    }
}

impl fmt::Display for CategoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({} items)", self.parent, self.name, self.quantity)
    }
}
