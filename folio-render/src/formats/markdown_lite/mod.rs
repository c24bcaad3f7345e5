//! MarkdownLite format
//!
//! # Syntax
//!
//! | Source            | IR                         |
//! |-------------------|----------------------------|
//! | `# text`          | `Heading { level: 1 }`     |
//! | `## text`         | `Heading { level: 2 }`     |
//! | `### text`        | `Heading { level: 3 }`     |
//! | `- item`, `* item`| item of a `List`           |
//! | other line        | `Paragraph`                |
//! | `**bold**`        | `Inline::Strong`           |
//! | `[label](url)`    | `Inline::Link` or text     |
//!
//! Lines are trimmed before classification. A blank line or any non-bullet line closes the
//! open list; blank lines never become paragraphs. Inline syntax is recognised within a
//! single line, leftmost match first, and never nests: a link label is literal text.

mod parser;

use crate::ir::nodes::Document;

pub use parser::parse_inlines;

/// The MarkdownLite parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownLite;

impl MarkdownLite {
    /// Parse source into IR. Never fails.
    pub fn parse(&self, source: &str) -> Document {
        parser::parse_document(source)
    }
}
