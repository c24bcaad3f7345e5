//! Dataset snapshots
//!
//!     A [Catalog] owns every tile of one fetch. Indexes borrow from it, so the borrow
//!     checker guarantees no index outlives or observes a replaced dataset: a refresh builds
//!     a new catalog and drops the old one.

use crate::csv;
use crate::hierarchy::HierarchyIndex;
use crate::normalize::{normalize_tiles, NormalizeOptions};
use crate::tile::Tile;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tiles: Vec<Tile>,
}

impl Catalog {
    /// Tokenize and normalize a CSV export.
    pub fn from_csv(text: &str, options: &NormalizeOptions) -> Self {
        let rows = csv::tokenize(text);
        let tiles = normalize_tiles(&rows, options);
        debug!(rows = rows.len(), tiles = tiles.len(), "loaded tile catalog");
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile by slug in any lane. With duplicate slugs the last one wins.
    pub fn get(&self, slug: &str) -> Option<&Tile> {
        self.tiles.iter().rev().find(|tile| tile.slug == slug)
    }

    pub fn index(&self, lane: &str) -> HierarchyIndex<'_> {
        HierarchyIndex::build(&self.tiles, lane)
    }

    /// Lanes present in the dataset, sorted.
    pub fn lanes(&self) -> Vec<&str> {
        self.tiles
            .iter()
            .map(|tile| tile.lane.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tag chips for a lane: every distinct tag, sorted.
    pub fn lane_tags(&self, lane: &str) -> Vec<&str> {
        self.tiles
            .iter()
            .filter(|tile| tile.lane == lane)
            .flat_map(|tile| tile.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
