//! HTML format
//!
//! Serialize-only. IR blocks map to elements as follows:
//!
//! | IR                  | HTML                                           |
//! |---------------------|------------------------------------------------|
//! | `Heading { level }` | `<hN>`, N = base level + level - 1, max 6      |
//! | `Paragraph`         | `<p>`                                          |
//! | `List`              | `<ul>` with one `<li>` per item                |
//! | `Strong`            | `<strong>`                                     |
//! | `Link`              | `<a href target="_blank" rel="noopener">`      |
//!
//! The output is a fragment: blocks are serialized back to back with no wrapper element
//! and no whitespace between them.

mod serializer;

use crate::error::RenderError;
use crate::ir::nodes::Document;
use crate::RenderOptions;

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat {
    options: RenderOptions,
}

impl HtmlFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
        serializer::serialize_to_html(doc, &self.options)
    }
}
