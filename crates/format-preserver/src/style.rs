//! Attribute detection for bold, underline and italic.

use std::fmt;
use std::str::FromStr;

use crate::node::Node;
use crate::PreserveError;

/// One of the inline formatting attributes that survive sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    Bold,
    Underline,
    Italic,
}

impl StyleAttribute {
    /// All attributes in the order they are applied. The attribute applied
    /// last ends up as the outermost marker pair.
    pub const ALL: [StyleAttribute; 3] = [
        StyleAttribute::Bold,
        StyleAttribute::Underline,
        StyleAttribute::Italic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleAttribute::Bold => "bold",
            StyleAttribute::Underline => "underline",
            StyleAttribute::Italic => "italic",
        }
    }

    /// Sentinel inserted before styled text
    pub fn start_marker(self) -> &'static str {
        match self {
            StyleAttribute::Bold => "#BOLD#",
            StyleAttribute::Underline => "#UNDERLINE#",
            StyleAttribute::Italic => "#ITALIC#",
        }
    }

    /// Sentinel inserted after styled text
    pub fn end_marker(self) -> &'static str {
        match self {
            StyleAttribute::Bold => "#ENDBOLD#",
            StyleAttribute::Underline => "#ENDUNDERLINE#",
            StyleAttribute::Italic => "#ENDITALIC#",
        }
    }

    /// Markup that replaces the start sentinel
    pub fn open_wrapper(self) -> &'static str {
        match self {
            StyleAttribute::Bold => r#"<span style="font-weight: bold">"#,
            StyleAttribute::Underline => r#"<span style="text-decoration: underline">"#,
            StyleAttribute::Italic => r#"<span style="font-style: italic">"#,
        }
    }

    /// Markup that replaces the end sentinel
    pub fn close_wrapper(self) -> &'static str {
        "</span>"
    }

    /// Tags that carry this attribute without any styling
    fn tags(self) -> &'static [&'static str] {
        match self {
            StyleAttribute::Bold => &["b", "strong"],
            StyleAttribute::Underline => &["u"],
            StyleAttribute::Italic => &["i", "em"],
        }
    }

    /// CSS properties consulted for this attribute
    fn properties(self) -> &'static [&'static str] {
        match self {
            StyleAttribute::Bold => &["font-weight"],
            StyleAttribute::Underline => &["text-decoration", "text-decoration-line"],
            StyleAttribute::Italic => &["font-style"],
        }
    }

    fn value_matches(self, value: &str) -> bool {
        let value = value.trim().to_ascii_lowercase();
        match self {
            StyleAttribute::Bold => {
                value == "bold"
                    || value == "bolder"
                    || value.parse::<f32>().is_ok_and(|weight| weight >= 700.0)
            }
            StyleAttribute::Underline => value.split_whitespace().any(|v| v == "underline"),
            StyleAttribute::Italic => value == "italic",
        }
    }

    /// Whether `node` exhibits this attribute.
    ///
    /// The computed style is consulted first; the element's own inline
    /// `style` attribute is only read when the resolver has no value. The tag
    /// name matches regardless. Only elements can match.
    pub fn test(self, node: &Node, resolver: &dyn StyleResolver) -> bool {
        if !node.is_element() {
            return false;
        }

        let styled = self.properties().iter().any(|property| {
            resolver
                .computed_style(node, property)
                .or_else(|| inline_style(node, property))
                .is_some_and(|value| self.value_matches(&value))
        });

        styled || self.tags().contains(&node.tag_name().as_str())
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleAttribute {
    type Err = PreserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" => Ok(StyleAttribute::Bold),
            "underline" => Ok(StyleAttribute::Underline),
            "italic" => Ok(StyleAttribute::Italic),
            _ => Err(PreserveError::UnknownAttribute(s.to_string())),
        }
    }
}

/// Computed-style lookup supplied by the host.
///
/// Returning `None` means the value is unknown; detection then falls back to
/// the inline style and the tag name.
pub trait StyleResolver: Send + Sync {
    fn computed_style(&self, node: &Node, property: &str) -> Option<String>;
}

/// Resolver that only sees an element's own `style` attribute.
///
/// There is no cascade and no inheritance, which matches what a detached
/// parsing document reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyleResolver;

impl StyleResolver for InlineStyleResolver {
    fn computed_style(&self, node: &Node, property: &str) -> Option<String> {
        inline_style(node, property)
    }
}

/// Resolver without computed styles; only inline styles and tag names count.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyleResolver;

impl StyleResolver for NoStyleResolver {
    fn computed_style(&self, _node: &Node, _property: &str) -> Option<String> {
        None
    }
}

fn inline_style(node: &Node, property: &str) -> Option<String> {
    let style = node.attr("style")?;
    // Later declarations win, as in CSS.
    parse_declarations(style)
        .into_iter()
        .rev()
        .find(|(name, _)| name == property)
        .map(|(_, value)| value)
}

/// Split a CSS declaration block into lower-cased `(property, value)` pairs.
///
/// Entries without a colon or with an empty name are skipped and
/// `!important` is dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            Some((name, value.to_ascii_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn styled(tag: &str, style: &str) -> Node {
        Node::element_with_attrs(tag, vec![("style", style)])
    }

    #[rstest]
    #[case(Node::element("b"), StyleAttribute::Bold)]
    #[case(Node::element("strong"), StyleAttribute::Bold)]
    #[case(Node::element("i"), StyleAttribute::Italic)]
    #[case(Node::element("em"), StyleAttribute::Italic)]
    #[case(Node::element("u"), StyleAttribute::Underline)]
    #[case(styled("span", "font-weight: bold"), StyleAttribute::Bold)]
    #[case(styled("span", "font-weight:700"), StyleAttribute::Bold)]
    #[case(styled("span", "FONT-WEIGHT: 900 !important"), StyleAttribute::Bold)]
    #[case(styled("span", "font-style: italic"), StyleAttribute::Italic)]
    #[case(styled("span", "text-decoration: underline dotted red"), StyleAttribute::Underline)]
    #[case(styled("span", "text-decoration-line: underline"), StyleAttribute::Underline)]
    fn test_detects_attribute(#[case] node: Node, #[case] attribute: StyleAttribute) {
        assert!(attribute.test(&node, &InlineStyleResolver));
    }

    #[rstest]
    #[case(Node::element("span"), StyleAttribute::Bold)]
    #[case(styled("span", "font-weight: 400"), StyleAttribute::Bold)]
    #[case(styled("span", "font-weight: normal"), StyleAttribute::Bold)]
    #[case(styled("span", "font-style: oblique"), StyleAttribute::Italic)]
    #[case(styled("span", "text-decoration: line-through"), StyleAttribute::Underline)]
    #[case(Node::element("b"), StyleAttribute::Italic)]
    #[case(Node::text("b"), StyleAttribute::Bold)]
    fn test_rejects_attribute(#[case] node: Node, #[case] attribute: StyleAttribute) {
        assert!(!attribute.test(&node, &InlineStyleResolver));
    }

    #[test]
    fn test_later_declaration_wins() {
        let node = styled("span", "font-weight: bold; font-weight: normal");
        assert!(!StyleAttribute::Bold.test(&node, &InlineStyleResolver));
    }

    #[test]
    fn test_custom_resolver() {
        struct AlwaysItalic;
        impl StyleResolver for AlwaysItalic {
            fn computed_style(&self, _node: &Node, property: &str) -> Option<String> {
                (property == "font-style").then(|| "italic".to_string())
            }
        }

        let span = Node::element("span");
        assert!(StyleAttribute::Italic.test(&span, &AlwaysItalic));
        assert!(!StyleAttribute::Bold.test(&span, &AlwaysItalic));
    }

    #[test]
    fn test_computed_value_takes_precedence_over_inline_style() {
        struct Normal;
        impl StyleResolver for Normal {
            fn computed_style(&self, _node: &Node, _property: &str) -> Option<String> {
                Some("normal".to_string())
            }
        }

        let span = styled("span", "font-weight: bold");
        assert!(!StyleAttribute::Bold.test(&span, &Normal));
        assert!(StyleAttribute::Bold.test(&Node::element("b"), &Normal));
    }

    #[test]
    fn test_no_resolver_falls_back_to_inline_and_tag() {
        assert!(StyleAttribute::Bold.test(&Node::element("b"), &NoStyleResolver));
        assert!(StyleAttribute::Bold.test(&styled("span", "font-weight: bold"), &NoStyleResolver));
    }

    #[test]
    fn test_parse_declarations() {
        assert_eq!(
            parse_declarations("color: Red; ; bogus; :x; Font-Weight : Bold !important"),
            vec![
                ("color".to_string(), "red".to_string()),
                ("font-weight".to_string(), "bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Bold".parse::<StyleAttribute>().unwrap(), StyleAttribute::Bold);
        assert_eq!(" italic ".parse::<StyleAttribute>().unwrap(), StyleAttribute::Italic);
        assert!(matches!(
            "strike".parse::<StyleAttribute>(),
            Err(PreserveError::UnknownAttribute(name)) if name == "strike"
        ));
    }

    #[test]
    fn test_sentinels_are_distinct() {
        let mut sentinels: Vec<&str> = StyleAttribute::ALL
            .iter()
            .flat_map(|a| [a.start_marker(), a.end_marker()])
            .collect();
        sentinels.sort_unstable();
        sentinels.dedup();
        assert_eq!(sentinels.len(), 6);
    }
}
