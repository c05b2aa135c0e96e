//! # format-preserver
//!
//! Flatten an HTML fragment to plain text while keeping bold, underline and
//! italic.
//!
//! ## Design
//!
//! The fragment is parsed into a [`Node`] tree and every styled element gets
//! its text wrapped in sentinel markers (`#BOLD#…#ENDBOLD#` and friends).
//! Taking the plain-text projection of the result drops all tags but keeps
//! the markers, which are then rewritten into canonical inline style spans:
//!
//! - bold → `<span style="font-weight: bold">…</span>`
//! - underline → `<span style="text-decoration: underline">…</span>`
//! - italic → `<span style="font-style: italic">…</span>`
//!
//! Ampersands are masked for the duration of the pass so entities come out
//! exactly as they went in.
//!
//! ## Example
//!
//! ```rust
//! use format_preserver::sanitize;
//!
//! assert_eq!(
//!     sanitize("<p>say <b>hi</b></p>"),
//!     r#"say <span style="font-weight: bold">hi</span>"#
//! );
//! assert_eq!(sanitize("A & B"), "A & B");
//! ```
//!
//! ## Example (custom options)
//!
//! ```rust
//! use format_preserver::{FormatPreserver, PreserveOptions, StyleAttribute};
//!
//! let preserver = FormatPreserver::with_options(PreserveOptions {
//!     attributes: vec![StyleAttribute::Italic],
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let text = preserver.sanitize("<b><i>hi</i></b>");
//! assert_eq!(text, r#"<span style="font-style: italic">hi</span>"#);
//! ```

mod decoder;
mod encoder;
#[cfg(feature = "html")]
pub mod html;
mod mask;
pub mod node;
mod parser;
mod service;
mod style;

pub use decoder::replace_markers;
#[cfg(feature = "html")]
pub use html::{parse_html, Html5Parser};
pub use mask::{demask_html_entities, mask_html_entities, AMP_PLACEHOLDER};
pub use node::{Node, NodeType};
pub use parser::MarkupParser;
pub use service::{Content, FormatPreserver, PreserveOptions};
pub use style::{parse_declarations, InlineStyleResolver, NoStyleResolver, StyleAttribute, StyleResolver};

/// Error type for format-preserver operations
#[derive(Debug, thiserror::Error)]
pub enum PreserveError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown style attribute: {0}")]
    UnknownAttribute(String),
}

pub type Result<T> = std::result::Result<T, PreserveError>;

/// Sanitize `html` with the default [`FormatPreserver`].
#[cfg(feature = "html")]
pub fn sanitize(html: &str) -> String {
    FormatPreserver::new().sanitize(html)
}
