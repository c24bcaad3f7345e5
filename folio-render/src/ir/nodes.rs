//! IR nodes
//!
//!     The tree is two levels deep: blocks hold inline runs, nothing nests further. Link
//!     targets stored here have already passed the scheme allow-list.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `level` is the number of `#` marks, 1 to 3.
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// One entry per consecutive bullet line.
    List(Vec<Vec<Inline>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Link { label: String, href: String },
}
