//! FormatPreserver - the main entry point for sanitizing markup.

use crate::decoder::{count_markers, replace_markers};
use crate::encoder::MarkerEncoder;
use crate::mask::{demask_with, mask_with, AMP_PLACEHOLDER};
use crate::node::Node;
use crate::parser::MarkupParser;
use crate::style::{StyleAttribute, StyleResolver};
use crate::{PreserveError, Result};

/// Options for FormatPreserver
#[derive(Debug, Clone)]
pub struct PreserveOptions {
    /// Attributes to keep. They are always applied in
    /// [`StyleAttribute::ALL`] order regardless of the order given here.
    pub attributes: Vec<StyleAttribute>,

    /// Token standing in for `&` while the markup is parsed
    pub amp_placeholder: String,
}

impl Default for PreserveOptions {
    fn default() -> Self {
        Self {
            attributes: StyleAttribute::ALL.to_vec(),
            amp_placeholder: AMP_PLACEHOLDER.to_string(),
        }
    }
}

impl PreserveOptions {
    fn validate(&self) -> Result<()> {
        if self.amp_placeholder.is_empty() {
            return Err(PreserveError::InvalidOption(
                "amp_placeholder must not be empty".to_string(),
            ));
        }
        if self.amp_placeholder.contains(&['&', '<', '>'][..]) {
            return Err(PreserveError::InvalidOption(
                "amp_placeholder must not contain '&', '<' or '>'".to_string(),
            ));
        }
        // The placeholder must not overlap any marker or wrapper, or demasking
        // would rewrite them.
        for attribute in StyleAttribute::ALL {
            let reserved = [
                attribute.start_marker(),
                attribute.end_marker(),
                attribute.open_wrapper(),
                attribute.close_wrapper(),
            ];
            if reserved
                .iter()
                .any(|r| r.contains(&self.amp_placeholder) || self.amp_placeholder.contains(r))
            {
                return Err(PreserveError::InvalidOption(format!(
                    "amp_placeholder '{}' overlaps the {} markers",
                    self.amp_placeholder, attribute
                )));
            }
        }
        for (i, attribute) in self.attributes.iter().enumerate() {
            if self.attributes[..i].contains(attribute) {
                return Err(PreserveError::InvalidOption(format!(
                    "attribute '{}' listed more than once",
                    attribute
                )));
            }
        }
        Ok(())
    }

    /// Enabled attributes in application order
    fn ordered_attributes(&self) -> Vec<StyleAttribute> {
        StyleAttribute::ALL
            .into_iter()
            .filter(|attribute| self.attributes.contains(attribute))
            .collect()
    }
}

/// Input that may or may not be markup.
///
/// Hosts with dynamic typing hand over whatever they received; only
/// [`Content::Markup`] is sanitized, anything else is returned untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<T> {
    Markup(String),
    Other(T),
}

/// Flattens markup to text that keeps bold, underline and italic.
pub struct FormatPreserver {
    options: PreserveOptions,
    attributes: Vec<StyleAttribute>,
    parser: Box<dyn MarkupParser>,
    resolver: Box<dyn StyleResolver>,
}

impl FormatPreserver {
    /// Create a FormatPreserver with default options and the html5ever parser
    #[cfg(feature = "html")]
    pub fn new() -> Self {
        let options = PreserveOptions::default();
        Self {
            attributes: options.ordered_attributes(),
            options,
            parser: Box::new(crate::html::Html5Parser),
            resolver: Box::new(crate::style::InlineStyleResolver),
        }
    }

    /// Create a FormatPreserver with custom options
    #[cfg(feature = "html")]
    pub fn with_options(options: PreserveOptions) -> Result<Self> {
        Self::with_parts(options, crate::html::Html5Parser, crate::style::InlineStyleResolver)
    }

    /// Create a FormatPreserver with a custom parser and style lookup
    pub fn with_parts<P, R>(options: PreserveOptions, parser: P, resolver: R) -> Result<Self>
    where
        P: MarkupParser + 'static,
        R: StyleResolver + 'static,
    {
        options.validate()?;
        if parser.text_content(&options.amp_placeholder) != options.amp_placeholder {
            return Err(PreserveError::InvalidOption(format!(
                "amp_placeholder '{}' does not survive parsing",
                options.amp_placeholder
            )));
        }
        Ok(Self {
            attributes: options.ordered_attributes(),
            options,
            parser: Box::new(parser),
            resolver: Box::new(resolver),
        })
    }

    /// Get the current options
    pub fn options(&self) -> &PreserveOptions {
        &self.options
    }

    /// Flatten `html` to text, re-expressing formatting as inline style spans.
    ///
    /// Never fails: malformed markup is recovered by the parser and stray
    /// sentinels are left in place.
    pub fn sanitize(&self, html: &str) -> String {
        let placeholder = self.options.amp_placeholder.as_str();
        let masked = mask_with(html, placeholder);

        let nodes = self.parser.parse_fragment(&masked);
        let annotated = self.add_markers(&nodes);
        let text = self.parser.text_content(&annotated);

        tracing::debug!(
            input_len = html.len(),
            node_count = nodes.len(),
            annotated_len = annotated.len(),
            markers = count_markers(&text),
            "Encoded markup"
        );

        demask_with(&self.replace_markers(&text), placeholder)
    }

    /// Sanitize markup and pass anything else through unchanged.
    pub fn sanitize_content<T>(&self, content: Content<T>) -> Content<T> {
        match content {
            Content::Markup(html) => Content::Markup(self.sanitize(&html)),
            other => other,
        }
    }

    /// Flatten a node list into markup with sentinel markers around styled text
    pub fn add_markers(&self, nodes: &[Node]) -> String {
        MarkerEncoder::new(&self.attributes, self.resolver.as_ref()).add_markers(nodes)
    }

    /// Flatten a single node (its children, if it is an element)
    pub fn add_markers_node(&self, node: &Node) -> String {
        MarkerEncoder::new(&self.attributes, self.resolver.as_ref()).add_markers_node(node)
    }

    /// Rewrite sentinel markers into style wrappers
    pub fn replace_markers(&self, text: &str) -> String {
        replace_markers(text, &self.attributes)
    }
}

#[cfg(feature = "html")]
impl Default for FormatPreserver {
    fn default() -> Self {
        Self::new()
    }
}
