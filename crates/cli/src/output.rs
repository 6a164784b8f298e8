//! Shortlist rendering.

use digiglass_client::search_url;
use digiglass_core::{CategoryRecord, Error};

/// Letter for the `index`th shortlist entry: `a`, `b`, … `z`.
fn letter(index: usize) -> char {
    u8::try_from(index).ok().filter(|i| *i < 26).map_or('?', |i| char::from(b'a' + i))
}

/// Render `records` as a lettered list with quantities and search links.
pub fn shortlist(base_url: &str, records: &[CategoryRecord], keywords: Option<&str>) -> Result<String, Error> {
    let width = records.iter().map(|r| r.quantity.to_string().len()).max().unwrap_or(1);
    let mut out = String::new();

    for (index, record) in records.iter().enumerate() {
        let url = search_url(base_url, record, keywords)?;
        out.push_str(&format!(
            "{}. {:>width$}  {} - {}\n    {}\n",
            letter(index),
            record.quantity,
            record.parent,
            record.name,
            url
        ));
    }

    Ok(out)
}
