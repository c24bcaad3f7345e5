//! Intermediate representation shared by the MarkdownLite parser and the HTML serializer

pub mod nodes;
