//! Queryable document abstraction over an HTML parser.
//!
//! The category extractor only needs a handful of capabilities: find an
//! element by id, find descendants by class marker or tag name, and read text
//! content and attribute values. Anything implementing [`MarkupDocument`] can
//! back it; [`HtmlDocument`] does so with `scraper`.

use scraper::{ElementRef, Html};

/// A parsed document that can be searched by element id.
pub trait MarkupDocument {
    type Node<'a>: MarkupNode
    where
        Self: 'a;

    /// First element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node<'_>>;
}

/// An element inside a [`MarkupDocument`].
///
/// All descendant queries exclude the element itself and return matches in
/// document order.
pub trait MarkupNode: Sized {
    /// Descendants carrying `class` in their class list.
    fn descendants_with_class(&self, class: &str) -> Vec<Self>;

    /// Descendants with the given tag name.
    fn descendants_with_tag(&self, tag: &str) -> Vec<Self>;

    /// Concatenated text content, trimmed of surrounding whitespace.
    fn text(&self) -> String;

    /// Value of attribute `name`, if present.
    fn attr(&self, name: &str) -> Option<String>;

    fn first_with_class(&self, class: &str) -> Option<Self> {
        self.descendants_with_class(class).into_iter().next()
    }

    fn first_with_tag(&self, tag: &str) -> Option<Self> {
        self.descendants_with_tag(tag).into_iter().next()
    }

    fn has_descendant_tag(&self, tag: &str) -> bool {
        self.first_with_tag(tag).is_some()
    }
}

/// HTML document parsed with `scraper` (html5ever).
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }
}

impl MarkupDocument for HtmlDocument {
    type Node<'a> = HtmlNode<'a>;

    fn element_by_id(&self, id: &str) -> Option<HtmlNode<'_>> {
        let root = self.html.root_element();
        std::iter::once(root)
            .chain(HtmlNode(root).elements())
            .find(|el| el.value().id() == Some(id))
            .map(HtmlNode)
    }
}

/// Element handle into an [`HtmlDocument`].
#[derive(Clone, Copy, Debug)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    fn elements(self) -> impl Iterator<Item = ElementRef<'a>> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap)
    }
}

impl MarkupNode for HtmlNode<'_> {
    fn descendants_with_class(&self, class: &str) -> Vec<Self> {
        self.elements()
            .filter(|el| el.value().classes().any(|c| c == class))
            .map(HtmlNode)
            .collect()
    }

    fn descendants_with_tag(&self, tag: &str) -> Vec<Self> {
        self.elements()
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(HtmlNode)
            .collect()
    }

    fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(String::from)
    }

    fn has_descendant_tag(&self, tag: &str) -> bool {
        self.elements().any(|el| el.value().name().eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html><body>
            <div id="outer" class="box">
                <p class="note first">  one  </p>
                <p class="note">two <b>bold</b></p>
                <a href="/x">link</a>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_element_by_id() {
        let doc = HtmlDocument::parse(HTML);
        assert!(doc.element_by_id("outer").is_some());
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_descendants_with_class_in_order() {
        let doc = HtmlDocument::parse(HTML);
        let outer = doc.element_by_id("outer").unwrap();
        let notes = outer.descendants_with_class("note");
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text(), "one");
        assert_eq!(notes[1].text(), "two bold");
    }

    #[test]
    fn test_descendants_exclude_self() {
        let doc = HtmlDocument::parse(HTML);
        let outer = doc.element_by_id("outer").unwrap();
        assert!(outer.descendants_with_class("box").is_empty());
        assert!(!outer.has_descendant_tag("div"));
    }

    #[test]
    fn test_attr() {
        let doc = HtmlDocument::parse(HTML);
        let outer = doc.element_by_id("outer").unwrap();
        let link = outer.first_with_tag("a").unwrap();
        assert_eq!(link.attr("href").as_deref(), Some("/x"));
        assert_eq!(link.attr("title"), None);
    }
}
