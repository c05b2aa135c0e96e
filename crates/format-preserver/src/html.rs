//! HTML parsing support.
//!
//! Converts html5ever output (through scraper) into the [`Node`] structure
//! used by the encoder. Every call parses into a fresh document, so nothing
//! leaks between calls and no script ever runs.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;
use crate::parser::MarkupParser;

/// [`MarkupParser`] backed by html5ever fragment parsing in a `<body>` context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5Parser;

impl MarkupParser for Html5Parser {
    fn parse_fragment(&self, markup: &str) -> Vec<Node> {
        parse_html(markup).children
    }

    fn text_content(&self, markup: &str) -> String {
        let document = Html::parse_fragment(markup);
        document.root_element().text().collect()
    }
}

/// Parse an HTML fragment into a single fragment node holding the top-level
/// nodes as children.
///
/// # Example
///
/// ```rust
/// use format_preserver::parse_html;
///
/// let fragment = parse_html("<b>Hello</b> World");
/// assert_eq!(fragment.children.len(), 2);
/// assert_eq!(fragment.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut fragment = Node::document_fragment();
    fragment.children = convert_children(document.root_element());
    fragment
}

fn convert_children(element: ElementRef) -> Vec<Node> {
    element
        .children()
        .filter_map(|child| match child.value() {
            ScraperNode::Text(text) => Some(Node::text(&text.text)),
            ScraperNode::Comment(comment) => Some(Node::comment(&comment.comment)),
            ScraperNode::Element(_) => ElementRef::wrap(child).map(scraper_to_node),
            _ => None,
        })
        .collect()
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);
    node.children = convert_children(element);
    node
}
