//! Ampersand masking around the intermediate parse.
//!
//! The parser would decode `&amp;`, `&lt;` and friends; masking the ampersand
//! keeps entity-like sequences verbatim until the final output.

/// Placeholder used by [`mask_html_entities`]
pub const AMP_PLACEHOLDER: &str = "#AMP#";

/// Replace every `&` with [`AMP_PLACEHOLDER`]
pub fn mask_html_entities(s: &str) -> String {
    mask_with(s, AMP_PLACEHOLDER)
}

/// Restore every [`AMP_PLACEHOLDER`] to `&`
pub fn demask_html_entities(s: &str) -> String {
    demask_with(s, AMP_PLACEHOLDER)
}

pub(crate) fn mask_with(s: &str, placeholder: &str) -> String {
    s.replace('&', placeholder)
}

pub(crate) fn demask_with(s: &str, placeholder: &str) -> String {
    s.replace(placeholder, "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mask() {
        assert_eq!(mask_html_entities("A & B &amp; C"), "A #AMP# B #AMP#amp; C");
        assert_eq!(mask_html_entities("none"), "none");
    }

    #[test]
    fn test_demask() {
        assert_eq!(demask_html_entities("#AMP#lt; #AMP#"), "&lt; &");
    }

    #[test]
    fn test_custom_placeholder() {
        let masked = mask_with("a&b", "\u{e000}");
        assert_eq!(masked, "a\u{e000}b");
        assert_eq!(demask_with(&masked, "\u{e000}"), "a&b");
    }
}
