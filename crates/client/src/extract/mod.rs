//! Category index extraction.
//!
//! Turns the vendor's category index page into [`CategoryRecord`]s.
//!
//! ### Page structure
//! - `#productIndexList` wraps the whole index.
//! - Each `.catfilteritem` is a top-level group; its `.catfiltertopitem`
//!   holds the group label.
//! - The group's `.catfiltersub` list holds one `<li>` per category, with an
//!   anchor to `/product-search/en/<parent>/<category>/<id>` and the text
//!   `<name> (<count> items)`.
//!
//! ### Malformed items
//! The site leaves some `<li>` tags unclosed, which nests later items inside
//! earlier ones. An `<li>` that contains another `<li>` is markup debris and
//! is skipped; the nested items are still visited on their own.
//!
//! Every other item must match both patterns. A mismatch fails the whole
//! pass with [`Error::Parse`]; nothing is guessed or defaulted.

pub mod markup;

pub use markup::{HtmlDocument, HtmlNode, MarkupDocument, MarkupNode};

use std::sync::LazyLock;

use digiglass_core::{CategoryRecord, Error};
use regex::Regex;

/// Element id of the category index container.
pub const INDEX_ID: &str = "productIndexList";
/// Class marking a top-level category group.
pub const GROUP_CLASS: &str = "catfilteritem";
/// Class marking a group's label.
pub const GROUP_LABEL_CLASS: &str = "catfiltertopitem";
/// Class marking a group's list of categories.
pub const SUBLIST_CLASS: &str = "catfiltersub";

static HREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/product-search/en/.+/.+/([0-9]+)(.+)?$").expect("invalid href pattern"));

static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) \(([0-9]+) items\)$").expect("invalid label pattern"));

/// Extract category records from raw HTML.
pub fn extract_categories(html: &str) -> Result<Vec<CategoryRecord>, Error> {
    extract_from(&HtmlDocument::parse(html))
}

/// Extract category records from any parsed markup document.
///
/// Records come back in document order: group order, then item order.
pub fn extract_from<D: MarkupDocument>(doc: &D) -> Result<Vec<CategoryRecord>, Error> {
    let index = doc
        .element_by_id(INDEX_ID)
        .ok_or_else(|| Error::Structure(format!("no element with id {INDEX_ID:?}")))?;

    let groups = index.descendants_with_class(GROUP_CLASS);
    let mut records = Vec::new();

    for (position, group) in groups.iter().enumerate() {
        let parent = group
            .first_with_class(GROUP_LABEL_CLASS)
            .ok_or_else(|| Error::Structure(format!("group #{position} has no .{GROUP_LABEL_CLASS}")))?
            .text();

        let sublist = group
            .first_with_class(SUBLIST_CLASS)
            .ok_or_else(|| Error::Structure(format!("group {parent:?} has no .{SUBLIST_CLASS}")))?;

        for item in sublist.descendants_with_tag("li") {
            if item.has_descendant_tag("li") {
                tracing::trace!(parent = %parent, "skipping nested list item");
                continue;
            }
            records.push(parse_item(&item, &parent)?);
        }
    }

    tracing::debug!(groups = groups.len(), records = records.len(), "extracted categories");

    Ok(records)
}

fn parse_item<N: MarkupNode>(item: &N, parent: &str) -> Result<CategoryRecord, Error> {
    let raw_text = item.text();
    let href = item
        .first_with_tag("a")
        .and_then(|anchor| anchor.attr("href"))
        .ok_or_else(|| Error::parse("anchor", raw_text.as_str()))?;

    let (name, quantity) = parse_label(&raw_text)?;
    let id = parse_href(&href)?;

    Ok(CategoryRecord::new(id, name, parent, quantity))
}

/// Split `"<name> (<count> items)"` into name and count.
pub fn parse_label(raw: &str) -> Result<(&str, u64), Error> {
    let caps = LABEL_PATTERN.captures(raw).ok_or_else(|| Error::parse("text", raw))?;
    let (Some(name), Some(count)) = (caps.get(1), caps.get(2)) else {
        return Err(Error::parse("text", raw));
    };
    let quantity = count.as_str().parse().map_err(|_| Error::parse("text", raw))?;
    Ok((name.as_str(), quantity))
}

/// Pull the category id out of a product-search link. Ids start at 1.
pub fn parse_href(href: &str) -> Result<u64, Error> {
    HREF_PATTERN
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::parse("href", href))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Product Index</title></head>
        <body>
            <div id="header"><a href="/product-search/en/x/y/999">Not an index entry (5 items)</a></div>
            <div id="productIndexList">
                <ul>
                    <li class="catfilteritem">
                        <h2 class="catfiltertopitem">
                            Battery Products
                        </h2>
                        <ul class="catfiltersub">
                            <li><a href="/product-search/en/battery-products/batteries-non-rechargeable-primary/393">Batteries Non-Rechargeable (Primary)</a> (5471 items)</li>
                            <li><a href="/product-search/en/battery-products/battery-chargers/94?stock=1">Battery Chargers</a> (1170 items)</li>
                        </ul>
                    </li>
                    <li class="catfilteritem">
                        <h2 class="catfiltertopitem">Capacitors</h2>
                        <ul class="catfiltersub">
                            <li><a href="/product-search/en/capacitors/ceramic-capacitors/60">Ceramic Capacitors</a> (401234 items)</li>
                            <li><a href="/product-search/en/capacitors/tantalum-capacitors/59">Tantalum Capacitors</a> (0 items)</li>
                        </ul>
                    </li>
                </ul>
            </div>
        </body>
        </html>
    "#;

    fn index_with_item(item: &str) -> String {
        format!(
            r#"<div id="productIndexList">
                <div class="catfilteritem">
                    <span class="catfiltertopitem">Resistors</span>
                    <ul class="catfiltersub">{item}</ul>
                </div>
            </div>"#
        )
    }

    #[test]
    fn test_extract_well_formed_index() {
        let records = extract_categories(INDEX_HTML).unwrap();

        assert_eq!(
            records,
            vec![
                CategoryRecord::new(393, "Batteries Non-Rechargeable (Primary)", "Battery Products", 5471),
                CategoryRecord::new(94, "Battery Chargers", "Battery Products", 1170),
                CategoryRecord::new(60, "Ceramic Capacitors", "Capacitors", 401_234),
                CategoryRecord::new(59, "Tantalum Capacitors", "Capacitors", 0),
            ]
        );
    }

    #[test]
    fn test_parent_label_is_trimmed() {
        let records = extract_categories(INDEX_HTML).unwrap();
        assert_eq!(records[0].parent, "Battery Products");
    }

    #[test]
    fn test_nested_item_skipped() {
        let html = index_with_item(
            r#"<li><a href="/product-search/en/resistors/chip-resistor/52">Chip Resistor</a> (900 items)
                   <ul><li><a href="/product-search/en/resistors/through-hole/53">Through Hole</a> (12 items)</li></ul>
               </li>
               <li><a href="/product-search/en/resistors/arrays/50">Arrays</a> (7 items)</li>"#,
        );

        let records = extract_categories(&html).unwrap();

        assert_eq!(
            records,
            vec![
                CategoryRecord::new(53, "Through Hole", "Resistors", 12),
                CategoryRecord::new(50, "Arrays", "Resistors", 7),
            ]
        );
    }

    #[test]
    fn test_missing_container_is_structure_error() {
        let html = r#"<html><body><h1>Service Unavailable</h1></body></html>"#;
        let result = extract_categories(html);
        assert!(matches!(result, Err(Error::Structure(_))));
    }

    #[test]
    fn test_missing_sublist_is_structure_error() {
        let html = r#"<div id="productIndexList">
            <div class="catfilteritem"><span class="catfiltertopitem">Resistors</span></div>
        </div>"#;
        let result = extract_categories(html);
        assert!(matches!(result, Err(Error::Structure(msg)) if msg.contains("Resistors")));
    }

    #[test]
    fn test_empty_index_yields_no_records() {
        let html = r#"<div id="productIndexList"></div>"#;
        assert!(extract_categories(html).unwrap().is_empty());
    }

    #[test]
    fn test_bad_label_is_parse_error() {
        let html = index_with_item(
            r#"<li><a href="/product-search/en/resistors/arrays/50">Arrays</a> (7 items)</li>
               <li><a href="/product-search/en/resistors/chip-resistor/52">Chip Resistor</a> (lots of items)</li>"#,
        );

        let result = extract_categories(&html);

        match result {
            Err(Error::Parse { what, raw }) => {
                assert_eq!(what, "text");
                assert_eq!(raw, "Chip Resistor (lots of items)");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_href_is_parse_error() {
        let html = index_with_item(r#"<li><a href="/catalog/resistors">Arrays</a> (7 items)</li>"#);

        let result = extract_categories(&html);

        assert!(matches!(result, Err(Error::Parse { what: "href", raw }) if raw == "/catalog/resistors"));
    }

    #[test]
    fn test_zero_id_is_parse_error() {
        let html = index_with_item(r#"<li><a href="/product-search/en/resistors/arrays/0">Arrays</a> (7 items)</li>"#);
        let result = extract_categories(&html);
        assert!(matches!(result, Err(Error::Parse { what: "href", raw }) if raw.ends_with("/0")));
    }

    #[test]
    fn test_missing_anchor_is_parse_error() {
        let html = index_with_item(r#"<li>Arrays (7 items)</li>"#);
        let result = extract_categories(&html);
        assert!(matches!(result, Err(Error::Parse { what: "anchor", .. })));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("LED Lighting (12 items)").unwrap(), ("LED Lighting", 12));
        assert_eq!(parse_label("Fans (Cooling) (3 items)").unwrap(), ("Fans (Cooling)", 3));
        assert!(parse_label("LED Lighting").is_err());
        assert!(parse_label("LED Lighting (-1 items)").is_err());
        assert!(parse_label("LED Lighting (99999999999999999999999 items)").is_err());
    }

    #[test]
    fn test_parse_href() {
        assert_eq!(parse_href("/product-search/en/capacitors/ceramic-capacitors/60").unwrap(), 60);
        assert_eq!(parse_href("/product-search/en/a/b/131083?k=led").unwrap(), 131_083);
        assert!(parse_href("/product-search/en/ceramic-capacitors/60").is_err());
        assert!(parse_href("https://example.com/product-search/en/a/b/60").is_err());
        assert!(parse_href("/product-search/en/a/b/0").is_err());
        assert!(parse_href("/product-search/en/a/b/000").is_err());
    }
}
