//! Search URL construction for a chosen category.

use digiglass_core::{CategoryRecord, Error};
use url::Url;

/// Build the product-search URL for `record` under `base`.
///
/// The path becomes `<base>/a/a/<id>`; the two placeholder segments stand in
/// for the parent and category slugs, which the site ignores. Non-empty
/// `keywords` are passed as the `k` query parameter.
pub fn search_url(base: &str, record: &CategoryRecord, keywords: Option<&str>) -> Result<Url, Error> {
    let mut url = Url::parse(base.trim()).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }

    let id = record.id.to_string();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(["a", "a", id.as_str()]);

    url.set_query(None);
    url.set_fragment(None);

    if let Some(keywords) = keywords.map(str::trim).filter(|k| !k.is_empty()) {
        url.query_pairs_mut().append_pair("k", keywords);
    }

    Ok(url)
}
