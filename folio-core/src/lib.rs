//! # folio-core
//!
//! The content pipeline behind the portfolio pages.
//!
//! Pipeline
//!
//!     raw CSV text ──► csv::tokenize ──► rows
//!                                         │
//!                      normalize::normalize_tiles
//!                                         │
//!                                         ▼
//!                     Catalog (one dataset snapshot, replaced wholesale)
//!                                         │
//!                              HierarchyIndex::build(lane)
//!                                         │
//!                           filter::evaluate(index, &Query)
//!                                         │
//!                                         ▼
//!                                  FilterResult ──► rendering layer
//!
//!     The experience feed is a separate, flat JSON document. It skips the CSV layer and
//!     the hierarchy and is matched directly, see [experience].
//!
//!     Nothing in this crate performs IO, reads the environment or keeps global state. The
//!     caller hands over a complete text blob and gets structured data back; how that text
//!     was fetched is not our concern.
//!
//! File Layout
//!
//!     .
//!     ├── csv.rs          # logos tokenizer + row assembly
//!     ├── tile.rs         # Tile record and Size
//!     ├── normalize.rs    # header mapping, field coercion, drop rules
//!     ├── hierarchy.rs    # per-lane parent/child index
//!     ├── filter.rs       # Query and the coherence-preserving evaluation
//!     ├── catalog.rs      # dataset snapshot
//!     ├── experience.rs   # JSON experience feed
//!     ├── media.rs        # URL helpers shared by tiles and the markdown renderer
//!     └── error.rs

pub mod catalog;
pub mod csv;
pub mod error;
pub mod experience;
pub mod filter;
pub mod hierarchy;
pub mod media;
pub mod normalize;
pub mod tile;

pub use catalog::Catalog;
pub use error::FeedError;
pub use experience::{Experience, ExperienceTag};
pub use filter::{evaluate, FilterResult, Query, VisibleEntry};
pub use hierarchy::HierarchyIndex;
pub use normalize::{normalize, normalize_tiles, NormalizeOptions};
pub use tile::{Size, Tile};
