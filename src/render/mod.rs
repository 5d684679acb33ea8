//! Rendering of review text into an HTML fragment.
//!
//! Review text is parsed into an owned [`Document`] tree first and then
//! rendered by [`ReviewRenderer`], which escapes all text content.

mod code_highlight;
mod document;
mod html;

pub use code_highlight::{CodeHighlighter, HighlightError};
pub use document::{
    Alignment, Block, Document, Inline, ListItem, Table, markup_options, parse_document,
};
pub use html::{ReviewRenderer, escape_html, is_safe_destination};
