//! DOM-like node tree consumed by the marker encoder.
//!
//! Any parser can produce this structure; the bundled [`Html5Parser`](crate::Html5Parser)
//! builds it from html5ever output. Nodes are owned by the caller of a single
//! sanitize pass and are never mutated by the encoder.

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// A node of a styled tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g. "B", "#text" for text nodes)
    pub node_name: String,

    /// Value of text and comment nodes
    pub node_value: Option<String>,

    /// Attributes as `(name, value)` pairs, in source order
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        node.attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style variant of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Concatenated text of this node and its descendants. Comments are skipped.
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self.children().map(Node::text_content).collect(),
        }
    }

    /// Serialize this node as markup
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => escape_html_text(self.node_value.as_deref().unwrap_or_default()),
            NodeType::Comment => {
                format!("<!--{}-->", self.node_value.as_deref().unwrap_or_default())
            }
            NodeType::Element => {
                let tag = self.tag_name();
                let open = self.open_tag();
                if is_void_element(&tag) {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_html(), tag)
                }
            }
            _ => self.inner_html(),
        }
    }

    /// Serialize the children of this node as markup.
    ///
    /// Text inside raw-text elements (`script`, `style`, ...) is written
    /// verbatim, since the parser does not decode entities there.
    pub fn inner_html(&self) -> String {
        let raw = self.is_element() && is_raw_text_element(&self.tag_name());
        self.children()
            .map(|child| match (raw, child.node_type) {
                (true, NodeType::Text) => child.node_value.clone().unwrap_or_default(),
                _ => child.outer_html(),
            })
            .collect()
    }

    /// The opening tag including attributes, e.g. `<span style="color: red">`
    pub(crate) fn open_tag(&self) -> String {
        let tag = self.tag_name();
        if self.attributes.is_empty() {
            return format!("<{}>", tag);
        }

        let attrs: Vec<String> = self
            .attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(value))
                }
            })
            .collect();
        format!("<{} {}>", tag, attrs.join(" "))
    }
}

/// Check if a tag is a void (self-closing) element
pub(crate) fn is_void_element(tag: &str) -> bool {
    const VOID_ELEMENTS: &[&str] = &[
        "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen",
        "link", "meta", "param", "source", "track", "wbr",
    ];
    VOID_ELEMENTS.contains(&tag)
}

/// Check if a tag holds raw text that the parser reads without decoding
/// entities. `noscript` counts because html5ever parses with scripting on.
pub(crate) fn is_raw_text_element(tag: &str) -> bool {
    const RAW_TEXT_ELEMENTS: &[&str] = &[
        "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
    ];
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Escape text for use inside element content
pub(crate) fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_element() {
        let node = Node::element("b");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "b");
        assert_eq!(node.node_name, "B");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes_are_case_insensitive() {
        let node = Node::element_with_attrs("span", vec![("STYLE", "font-weight: bold")]);
        assert_eq!(node.attr("style"), Some("font-weight: bold"));
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_children() {
        let parent = Node::element("div")
            .with_child(Node::text("Hello"))
            .with_child(Node::element("span"))
            .with_child(Node::comment("note"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.children().filter(|n| n.is_element()).count(), 1);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let div = Node::element("div")
            .with_child(Node::text("Hello "))
            .with_child(Node::comment("hidden"))
            .with_child(Node::element("span").with_child(Node::text("World")));

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_outer_html_escapes_text() {
        let p = Node::element_with_attrs("p", vec![("title", "a \"b\"")])
            .with_child(Node::text("1 < 2 & 3"));

        assert_eq!(
            p.outer_html(),
            "<p title=\"a &quot;b&quot;\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_raw_text_children_are_not_escaped() {
        let style = Node::element("style").with_child(Node::text("a > b & c"));
        assert_eq!(style.outer_html(), "<style>a > b & c</style>");

        let title = Node::element("title").with_child(Node::text("a > b"));
        assert_eq!(title.outer_html(), "<title>a &gt; b</title>");
    }

    #[test]
    fn test_void_element_html() {
        assert_eq!(Node::element("br").outer_html(), "<br>");
        let img = Node::element_with_attrs("img", vec![("src", "x.png"), ("alt", "")]);
        assert_eq!(img.outer_html(), "<img src=\"x.png\" alt>");
    }
}
