//! Per-lane hierarchy index
//!
//!     Tiles reference their parent by slug. For one lane the index resolves those references
//!     into a list of top-level tiles and, per parent, an ordered list of children. Slug
//!     lookups cover the whole dataset so detail views can follow links across lanes.
//!
//! Orphan Promotion
//!
//!     A tile never disappears because of a bad parent reference. When the parent slug is
//!     unknown in the lane, names the tile itself, or sits on a parent cycle, the tile is
//!     promoted to the top level instead of being filed as a child.
//!
//! Ordering
//!
//!     Top-level tiles: `(sort, title)`. Children: `(child_order, sort)`. Both sorts are stable,
//!     so ties keep the order of the input slice.
//!
//!     Building is pure: the same tiles and lane always give the same index.

use crate::tile::Tile;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HierarchyIndex<'a> {
    lane: String,
    top_level: Vec<&'a Tile>,
    by_parent: HashMap<&'a str, Vec<&'a Tile>>,
    in_lane: HashMap<&'a str, &'a Tile>,
    by_slug: HashMap<&'a str, &'a Tile>,
}

impl<'a> HierarchyIndex<'a> {
    pub fn build(tiles: &'a [Tile], lane: &str) -> Self {
        let by_slug: HashMap<&str, &Tile> = tiles.iter().map(|t| (t.slug.as_str(), t)).collect();
        let in_lane: HashMap<&str, &Tile> = tiles
            .iter()
            .filter(|t| t.lane == lane)
            .map(|t| (t.slug.as_str(), t))
            .collect();

        let mut top_level = Vec::new();
        let mut by_parent: HashMap<&str, Vec<&Tile>> = HashMap::new();

        for tile in tiles.iter().filter(|t| t.lane == lane) {
            match tile.parent_slug.as_deref() {
                Some(parent) if in_lane.contains_key(parent) && !on_parent_cycle(tile, &in_lane) => {
                    by_parent.entry(parent).or_default().push(tile);
                }
                Some(parent) => {
                    debug!(slug = %tile.slug, parent, lane, "promoting orphan tile to top level");
                    top_level.push(tile);
                }
                None => top_level.push(tile),
            }
        }

        top_level.sort_by(|a, b| a.sort.cmp(&b.sort).then_with(|| a.title.cmp(&b.title)));
        for children in by_parent.values_mut() {
            children.sort_by(|a, b| {
                a.child_order
                    .cmp(&b.child_order)
                    .then_with(|| a.sort.cmp(&b.sort))
            });
        }

        Self {
            lane: lane.to_string(),
            top_level,
            by_parent,
            in_lane,
            by_slug,
        }
    }

    pub fn lane(&self) -> &str {
        &self.lane
    }

    pub fn top_level(&self) -> &[&'a Tile] {
        &self.top_level
    }

    /// Ordered children of `slug`; empty for leaves and unknown slugs.
    pub fn children(&self, slug: &str) -> &[&'a Tile] {
        self.by_parent.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Children shown in a tile's detail view. Only large tiles of this lane expand.
    pub fn detail_children(&self, slug: &str) -> &[&'a Tile] {
        match self.in_lane.get(slug) {
            Some(tile) if tile.is_large() => self.children(slug),
            _ => &[],
        }
    }

    /// Any tile of the dataset, regardless of lane.
    pub fn get(&self, slug: &str) -> Option<&'a Tile> {
        self.by_slug.get(slug).copied()
    }

    /// Number of lane tiles reachable from the index (top level plus children).
    pub fn len(&self) -> usize {
        self.top_level.len() + self.by_parent.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether walking up from `tile`'s parent leads back to `tile`.
fn on_parent_cycle(tile: &Tile, in_lane: &HashMap<&str, &Tile>) -> bool {
    let mut seen = HashSet::new();
    let mut current = tile.parent_slug.as_deref();
    while let Some(slug) = current {
        if slug == tile.slug {
            return true;
        }
        if !seen.insert(slug) {
            return false;
        }
        current = in_lane.get(slug).and_then(|t| t.parent_slug.as_deref());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::testing::{child, tile};
    use crate::tile::Size;

    fn slugs(tiles: &[&Tile]) -> Vec<String> {
        tiles.iter().map(|t| t.slug.clone()).collect()
    }

    #[test]
    fn test_parent_and_children() {
        let tiles = vec![
            tile("a", "biz", Size::Large),
            child("b", "biz", "a"),
            tile("c", "biz", Size::Small),
        ];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(slugs(index.top_level()), vec!["a", "c"]);
        assert_eq!(slugs(index.children("a")), vec!["b"]);
        assert!(index.children("c").is_empty());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_orphans_are_promoted() {
        let tiles = vec![
            child("lost", "biz", "nowhere"),
            child("self", "biz", "self"),
            tile("other-lane-parent", "art", Size::Large),
            child("cross", "biz", "other-lane-parent"),
        ];
        let index = HierarchyIndex::build(&tiles, "biz");
        let mut top = slugs(index.top_level());
        top.sort();
        assert_eq!(top, vec!["cross", "lost", "self"]);
    }

    #[test]
    fn test_parent_cycle_is_promoted_but_tail_stays_child() {
        let tiles = vec![
            child("x", "biz", "y"),
            child("y", "biz", "x"),
            child("z", "biz", "x"),
        ];
        let index = HierarchyIndex::build(&tiles, "biz");
        let mut top = slugs(index.top_level());
        top.sort();
        assert_eq!(top, vec!["x", "y"]);
        assert_eq!(slugs(index.children("x")), vec!["z"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_child_ordering_is_stable() {
        let mut first = child("first", "biz", "p");
        first.child_order = 1;
        first.sort = 5;
        let mut second = child("second", "biz", "p");
        second.child_order = 1;
        second.sort = 5;
        let mut early = child("early", "biz", "p");
        early.child_order = 0;
        early.sort = 100;
        let mut low_sort = child("low-sort", "biz", "p");
        low_sort.child_order = 1;
        low_sort.sort = 1;

        let tiles = vec![tile("p", "biz", Size::Large), first, second, early, low_sort];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(
            slugs(index.children("p")),
            vec!["early", "low-sort", "first", "second"]
        );
    }

    #[test]
    fn test_top_level_sorted_by_sort_then_title() {
        let mut b = tile("b", "biz", Size::Small);
        b.title = "Beta".into();
        b.sort = 1;
        let mut a = tile("a", "biz", Size::Small);
        a.title = "Alpha".into();
        a.sort = 1;
        let mut z = tile("z", "biz", Size::Small);
        z.sort = 0;
        let tiles = vec![b, a, z];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(slugs(index.top_level()), vec!["z", "a", "b"]);
    }

    #[test]
    fn test_by_slug_spans_lanes() {
        let tiles = vec![tile("a", "biz", Size::Small), tile("b", "art", Size::Small)];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(index.get("b").map(|t| t.lane.as_str()), Some("art"));
        assert_eq!(index.top_level().len(), 1);
        assert_eq!(index.lane(), "biz");
    }

    #[test]
    fn test_detail_children_only_for_large() {
        let tiles = vec![
            tile("big", "biz", Size::Large),
            child("big-kid", "biz", "big"),
            tile("mid", "biz", Size::Medium),
            child("mid-kid", "biz", "mid"),
        ];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(slugs(index.detail_children("big")), vec!["big-kid"]);
        assert!(index.detail_children("mid").is_empty());
        assert_eq!(slugs(index.children("mid")), vec!["mid-kid"]);
    }

    #[test]
    fn test_detail_children_use_the_lane_tile_for_shared_slugs() {
        let tiles = vec![
            tile("p", "biz", Size::Large),
            child("k", "biz", "p"),
            tile("p", "art", Size::Small),
        ];
        let index = HierarchyIndex::build(&tiles, "biz");
        assert_eq!(index.get("p").map(|t| t.lane.as_str()), Some("art"));
        assert_eq!(slugs(index.detail_children("p")), vec!["k"]);

        let art = HierarchyIndex::build(&tiles, "art");
        assert!(art.detail_children("p").is_empty());
    }

    #[test]
    fn test_unknown_lane_is_empty() {
        let tiles = vec![tile("a", "biz", Size::Small)];
        let index = HierarchyIndex::build(&tiles, "nope");
        assert!(index.is_empty());
        assert!(index.get("a").is_some());
    }
}
