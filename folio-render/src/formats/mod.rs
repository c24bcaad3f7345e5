//! Input and output formats
//!
//! MarkdownLite is parse-only, HTML is serialize-only. The IR sits between them.

pub mod html;
pub mod markdown_lite;
