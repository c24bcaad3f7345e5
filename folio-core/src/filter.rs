//! Filter engine
//!
//!     Evaluates a [Query] against a [HierarchyIndex] and decides what the grid shows. The
//!     query is a plain value owned by the caller; evaluation never mutates the index and
//!     returns entries in top-level order, so identical inputs give identical output.
//!
//! Matching
//!
//!     A tile matches when both hold:
//!         - no tags are selected, or the tile carries at least one selected tag;
//!         - the trimmed free text is empty, or its lower-cased form occurs in the tile's
//!           [search text](Tile::search_text).
//!
//! Coherence
//!
//!     Large parents keep their group together. A large parent with children is shown when
//!     it or any child matches. If only children match, the parent is shown as an anchor
//!     carrying just the matching children; if the parent matches, all its children come
//!     along. Every other top-level tile is matched on its own and carries no children.

use crate::hierarchy::HierarchyIndex;
use crate::tile::Tile;
use serde::Serialize;
use std::collections::BTreeSet;

/// Live filter state: free text plus selected tag chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    free_text: String,
    selected_tags: BTreeSet<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    /// Select the tag if it is not selected, deselect it otherwise. Returns the new state.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.free_text.clear();
        self.selected_tags.clear();
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    /// Normalized free text; `None` when it doesn't constrain anything.
    pub fn needle(&self) -> Option<String> {
        let needle = self.free_text.trim().to_lowercase();
        (!needle.is_empty()).then_some(needle)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_tags.is_empty() && self.needle().is_none()
    }

    pub fn matches(&self, tile: &Tile) -> bool {
        Matcher::new(self).matches(tile)
    }
}

/// A query with its free text normalized once per evaluation.
struct Matcher<'q> {
    needle: Option<String>,
    tags: &'q BTreeSet<String>,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q Query) -> Self {
        Self {
            needle: query.needle(),
            tags: &query.selected_tags,
        }
    }

    fn matches(&self, tile: &Tile) -> bool {
        if !self.tags.is_empty() && !tile.has_any_tag(self.tags) {
            return false;
        }
        match &self.needle {
            Some(needle) => tile.search_text().contains(needle.as_str()),
            None => true,
        }
    }
}

/// One top-level card of the filtered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEntry<'a> {
    pub tile: &'a Tile,
    /// False when the tile is only shown to anchor its matching children.
    pub matched: bool,
    /// Children rendered beneath a large parent.
    pub children: Vec<&'a Tile>,
}

impl VisibleEntry<'_> {
    pub fn is_anchor(&self) -> bool {
        !self.matched
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterResult<'a> {
    entries: Vec<VisibleEntry<'a>>,
}

impl<'a> FilterResult<'a> {
    pub fn entries(&self) -> &[VisibleEntry<'a>] {
        &self.entries
    }

    /// Top-level cards shown.
    pub fn shown_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every visible tile, each parent followed by the children shown beneath it.
    pub fn tiles(&self) -> Vec<&'a Tile> {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.tile).chain(entry.children.iter().copied()))
            .collect()
    }
}

/// Project the index through the query.
pub fn evaluate<'a>(index: &HierarchyIndex<'a>, query: &Query) -> FilterResult<'a> {
    let matcher = Matcher::new(query);
    let mut entries = Vec::new();

    for &parent in index.top_level() {
        let children = index.children(&parent.slug);
        let parent_matches = matcher.matches(parent);

        if parent.is_large() && !children.is_empty() {
            if parent_matches {
                entries.push(VisibleEntry {
                    tile: parent,
                    matched: true,
                    children: children.to_vec(),
                });
                continue;
            }
            let matching: Vec<&Tile> = children
                .iter()
                .copied()
                .filter(|child| matcher.matches(child))
                .collect();
            if !matching.is_empty() {
                entries.push(VisibleEntry {
                    tile: parent,
                    matched: false,
                    children: matching,
                });
            }
        } else if parent_matches {
            entries.push(VisibleEntry {
                tile: parent,
                matched: true,
                children: Vec::new(),
            });
        }
    }

    FilterResult { entries }
}
