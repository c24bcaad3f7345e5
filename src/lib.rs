//! # folio
//!
//! Content pipeline for a spreadsheet-backed portfolio. A published sheet arrives as CSV
//! text; this crate turns it into tiles, groups them per lane into a parent/child
//! hierarchy, filters that hierarchy for the current query and renders tile bodies from a
//! small markdown subset.
//!
//!     parse_csv ──► normalize_tiles ──► build_index ──► filter_index ──► display layer
//!                                                                   render_markdown_lite
//!
//! The work is split across crates, re-exported here:
//!
//!     - folio-core: tokenizer, normalizer, hierarchy index, filter engine, experience feed
//!     - folio-render: MarkdownLite → IR → HTML
//!     - folio-config: layered configuration (used by applications, not by this facade)
//!
//! Every function here is pure. Fetching the feed, caching and storing UI state belong
//! to the caller.

pub use folio_core::csv::Rows;
pub use folio_core::experience::{self, Experience, ExperienceTag};
pub use folio_core::filter::{FilterResult, Query, VisibleEntry};
pub use folio_core::media;
pub use folio_core::{Catalog, FeedError, HierarchyIndex, NormalizeOptions, Size, Tile};
pub use folio_render::{RenderError, RenderOptions};

/// Tokenize CSV text into rows of fields. Never fails.
pub fn parse_csv(text: &str) -> Rows {
    folio_core::csv::tokenize(text)
}

/// Normalize tokenized rows, first row being the header, with the default feed options.
pub fn normalize_tiles(rows: &[Vec<String>]) -> Vec<Tile> {
    folio_core::normalize_tiles(rows, &NormalizeOptions::default())
}

/// Index one lane of a tile set.
pub fn build_index<'a>(tiles: &'a [Tile], lane: &str) -> HierarchyIndex<'a> {
    HierarchyIndex::build(tiles, lane)
}

/// Visible entries of an index under `query`.
pub fn filter_index<'a>(index: &HierarchyIndex<'a>, query: &Query) -> FilterResult<'a> {
    folio_core::evaluate(index, query)
}

/// Render a MarkdownLite tile body to an HTML fragment.
pub fn render_markdown_lite(source: &str) -> Result<String, RenderError> {
    folio_render::render_markdown_lite(source)
}
