//! Marker decoder: rewrites sentinels into canonical style wrappers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::style::StyleAttribute;

struct MarkerPatterns {
    attribute: StyleAttribute,
    start: Regex,
    end: Regex,
}

static PATTERNS: Lazy<Vec<MarkerPatterns>> = Lazy::new(|| {
    StyleAttribute::ALL
        .iter()
        .map(|&attribute| MarkerPatterns {
            attribute,
            start: literal(attribute.start_marker()),
            end: literal(attribute.end_marker()),
        })
        .collect()
});

fn literal(marker: &str) -> Regex {
    Regex::new(&regex::escape(marker)).expect("escaped literal is a valid pattern")
}

/// Replace every sentinel of the enabled `attributes` with its wrapper.
///
/// Attributes are processed in [`StyleAttribute::ALL`] order. Unmatched or
/// missing sentinels are left as they are.
pub fn replace_markers(text: &str, attributes: &[StyleAttribute]) -> String {
    let mut result = text.to_string();

    for patterns in PATTERNS.iter() {
        if !attributes.contains(&patterns.attribute) {
            continue;
        }
        let attribute = patterns.attribute;
        result = patterns
            .start
            .replace_all(&result, regex::NoExpand(attribute.open_wrapper()))
            .into_owned();
        result = patterns
            .end
            .replace_all(&result, regex::NoExpand(attribute.close_wrapper()))
            .into_owned();
    }

    result
}

/// Number of sentinel occurrences in `text`, for any attribute.
pub(crate) fn count_markers(text: &str) -> usize {
    PATTERNS
        .iter()
        .map(|p| p.start.find_iter(text).count() + p.end.find_iter(text).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(text: &str) -> String {
        replace_markers(text, &StyleAttribute::ALL)
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(decode("plain text"), "plain text");
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            decode("#BOLD#hello#ENDBOLD#"),
            r#"<span style="font-weight: bold">hello</span>"#
        );
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            decode("#BOLD##ITALIC#hi#ENDITALIC##ENDBOLD#"),
            r#"<span style="font-weight: bold"><span style="font-style: italic">hi</span></span>"#
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        assert_eq!(
            decode("#UNDERLINE#a#ENDUNDERLINE# #UNDERLINE#b#ENDUNDERLINE#"),
            r#"<span style="text-decoration: underline">a</span> <span style="text-decoration: underline">b</span>"#
        );
    }

    #[test]
    fn test_unmatched_markers_are_tolerated() {
        assert_eq!(
            decode("x#ENDITALIC# #BOLD#y"),
            r#"x</span> <span style="font-weight: bold">y"#
        );
    }

    #[test]
    fn test_disabled_attribute_left_alone() {
        assert_eq!(
            replace_markers("#BOLD#x#ENDBOLD#", &[StyleAttribute::Italic]),
            "#BOLD#x#ENDBOLD#"
        );
    }

    #[test]
    fn test_count_markers() {
        assert_eq!(count_markers("#BOLD##ITALIC#hi#ENDITALIC##ENDBOLD# #AMP#"), 4);
        assert_eq!(count_markers("no markers"), 0);
    }
}
