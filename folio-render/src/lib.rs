//! MarkdownLite rendering for tile bodies
//!
//!     Tile bodies are written in a deliberately small markdown subset: `#` to `###` headings,
//!     `-` / `*` bullet lists, paragraphs, `**bold**` and `[label](url)` links. Anything else is
//!     plain text. This crate turns that source into an HTML fragment.
//!
//! Architecture
//!
//!     source ──► formats::markdown_lite (parser) ──► ir::nodes::Document
//!                                                          │
//!                                     formats::html (RcDom build + serialize)
//!                                                          │
//!                                                          ▼
//!                                                   HTML fragment
//!
//!     The parser never emits markup. It produces IR nodes and all text reaches the output
//!     through html5ever's serializer, which escapes it. Only the element and attribute
//!     names chosen by the HTML stage are raw, so no source text can inject tags.
//!
//!     Links are only emitted for http, https and mailto targets. Other schemes degrade to
//!     their label as plain text.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── ir
//!     │   └── nodes.rs
//!     ├── formats
//!     │   ├── markdown_lite
//!     │   │   ├── parser.rs
//!     │   │   └── mod.rs
//!     │   └── html
//!     │       ├── serializer.rs
//!     │       └── mod.rs
//!     └── lib.rs
//!
//!     This is a pure lib: no IO, no environment, no global state.

pub mod error;
pub mod formats;
pub mod ir;

pub use error::RenderError;
pub use formats::html::HtmlFormat;
pub use formats::markdown_lite::MarkdownLite;

/// Knobs of the HTML stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// HTML level of a `#` heading. `##` and `###` render one and two levels deeper, capped at 6.
    pub base_heading_level: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_heading_level: 2,
        }
    }
}

/// Render MarkdownLite source to an HTML fragment with the default options.
pub fn render_markdown_lite(source: &str) -> Result<String, RenderError> {
    render_with(source, &RenderOptions::default())
}

pub fn render_with(source: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let doc = MarkdownLite.parse(source);
    HtmlFormat::new(*options).serialize(&doc)
}
