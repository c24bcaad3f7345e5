//! Tile records
//!
//!     A tile is one published row of the spreadsheet feed. Tiles are built once by the
//!     normalizer and never patched afterwards; a new fetch produces a new set of tiles.

use crate::media::{format_dates, is_youtube_url, youtube_thumb};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Display size of a tile. Only large tiles act as expandable parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// Case-insensitive parse of a size cell.
    pub fn parse(value: &str) -> Option<Size> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub slug: String,
    pub lane: String,
    pub size: Size,
    /// Slug of the parent tile within the same lane, if any.
    pub parent_slug: Option<String>,
    pub child_order: i64,

    pub title: String,
    pub subtitle: String,
    pub tags: Vec<String>,

    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub thumb_url: Option<String>,
    pub href: Option<String>,
    /// Markdown-lite source, rendered by folio-render.
    pub body_md: String,

    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,

    pub published: bool,
    pub featured: bool,
    pub sort: i64,
}

impl Tile {
    pub fn is_large(&self) -> bool {
        self.size == Size::Large
    }

    /// Lower-cased text that free-text queries are matched against.
    pub fn search_text(&self) -> String {
        let tags = self.tags.join(" ");
        [
            self.title.as_str(),
            self.subtitle.as_str(),
            tags.as_str(),
            self.body_md.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn has_any_tag(&self, selected: &BTreeSet<String>) -> bool {
        self.tags.iter().any(|tag| selected.contains(tag))
    }

    /// Human date range, e.g. `2021 — Present`. Empty when no dates are known.
    pub fn date_label(&self) -> String {
        format_dates(&self.start_date, &self.end_date, self.is_current)
    }

    /// Grid cards only ever show an explicit image.
    pub fn card_thumb(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Detail views fall back from the image to the video's thumbnail.
    pub fn hero_thumb(&self) -> Option<String> {
        if let Some(image) = &self.image_url {
            return Some(image.clone());
        }
        let video = self.video_url.as_deref()?;
        if let Some(thumb) = &self.thumb_url {
            return Some(thumb.clone());
        }
        if is_youtube_url(video) {
            return youtube_thumb(video);
        }
        None
    }
}
