//! Marker encoder.
//!
//! Walks a node list and wraps the text of every styled element with the
//! sentinels of each matching [`StyleAttribute`]. Descendants are marked
//! before their ancestors, so an element's text already carries the markers
//! of everything nested in it when its own markers are added.

use crate::node::{escape_html_text, is_raw_text_element, is_void_element, Node, NodeType};
use crate::style::{StyleAttribute, StyleResolver};

/// Encoder state for one pass: the enabled attributes and the style lookup.
pub(crate) struct MarkerEncoder<'a> {
    attributes: &'a [StyleAttribute],
    resolver: &'a dyn StyleResolver,
}

impl<'a> MarkerEncoder<'a> {
    /// `attributes` must already be in application order.
    pub(crate) fn new(attributes: &'a [StyleAttribute], resolver: &'a dyn StyleResolver) -> Self {
        Self {
            attributes,
            resolver,
        }
    }

    /// Flatten a node list into annotated markup.
    ///
    /// Elements contribute their inner markup, text nodes their literal
    /// value. Other node kinds are dropped.
    pub(crate) fn add_markers(&self, nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(|node| match node.node_type {
                NodeType::Element => self.inner_markup(node),
                NodeType::Text => node.node_value.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .collect()
    }

    /// Same as [`add_markers`](Self::add_markers) for a single node.
    pub(crate) fn add_markers_node(&self, node: &Node) -> String {
        self.add_markers(std::slice::from_ref(node))
    }

    /// Attributes matched by `node`, in application order
    fn matching(&self, node: &Node) -> Vec<StyleAttribute> {
        self.attributes
            .iter()
            .copied()
            .filter(|attribute| attribute.test(node, self.resolver))
            .collect()
    }

    /// Text of `node` with the markers of the node and all its descendants.
    fn marked_text(&self, node: &Node) -> String {
        let text: String = node
            .children()
            .map(|child| match child.node_type {
                NodeType::Text => child.node_value.clone().unwrap_or_default(),
                NodeType::Element => self.marked_text(child),
                _ => String::new(),
            })
            .collect();

        self.wrap(node, text)
    }

    fn wrap(&self, node: &Node, text: String) -> String {
        self.matching(node).into_iter().fold(text, |text, attribute| {
            tracing::trace!(tag = %node.tag_name(), %attribute, "Marking element");
            format!("{}{}{}", attribute.start_marker(), text, attribute.end_marker())
        })
    }

    /// Markup of the children of `node` after marking.
    ///
    /// A styled element collapses into a single text run holding its marked
    /// text, so its own subtree structure is not serialized.
    ///
    /// Text under raw-text elements is emitted verbatim, as the parser reads
    /// it without decoding entities.
    fn inner_markup(&self, node: &Node) -> String {
        let raw = is_raw_text_element(&node.tag_name());
        if !self.matching(node).is_empty() {
            let text = self.marked_text(node);
            return if raw { text } else { escape_html_text(&text) };
        }

        node.children()
            .map(|child| match (raw, child.node_type) {
                (true, NodeType::Text) => child.node_value.clone().unwrap_or_default(),
                _ => self.outer_markup(child),
            })
            .collect()
    }

    fn outer_markup(&self, node: &Node) -> String {
        match node.node_type {
            NodeType::Element => {
                let tag = node.tag_name();
                let open = node.open_tag();
                if is_void_element(&tag) {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_markup(node), tag)
                }
            }
            _ => node.outer_html(),
        }
    }
}
