//! Seam for the host markup parser.

use crate::node::Node;

/// Markup parser used by a sanitize pass.
///
/// Implementations must parse into a tree that is isolated from any live
/// document and must recover from malformed input instead of failing.
pub trait MarkupParser: Send + Sync {
    /// Parse a fragment and return its top-level nodes.
    fn parse_fragment(&self, markup: &str) -> Vec<Node>;

    /// Parse a fragment and return its plain-text projection.
    fn text_content(&self, markup: &str) -> String {
        self.parse_fragment(markup).iter().map(Node::text_content).collect()
    }
}
