//! Experience feed
//!
//!     The JSON feed is a flat list of experiences under a top-level `experiences` key. Every
//!     field is optional in the document and defaults to empty, so a sparse record still
//!     renders. Experiences are partitioned by `bucket`, the same lane idea tiles use.
//!
//! Matching
//!
//!     Free text is matched against title, subtitle, timeframe, location, summary, each tag
//!     as `group value` and the content paragraphs. Selected tags are `group::value` keys and,
//!     unlike tile tags, every selected key must be present.

use crate::error::FeedError;
use crate::filter::Query;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub slug: String,
    pub bucket: String,
    pub kicker: String,
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub timeframe: String,
    pub location: String,
    pub detail_level: DetailLevel,
    pub tags: Vec<ExperienceTag>,
    pub content: Content,
    pub sub_experiences: Vec<Experience>,
}

/// How much detail a card opens into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum DetailLevel {
    /// Expands in place.
    Low,
    /// Opens a modal.
    Medium,
    /// Links to a deep-dive page.
    #[default]
    High,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Low => "L",
            DetailLevel::Medium => "M",
            DetailLevel::High => "H",
        }
    }

    pub fn has_deep_dive(&self) -> bool {
        *self == DetailLevel::High
    }
}

/// Anything but `L` or `M` reads as high detail.
impl From<Option<String>> for DetailLevel {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("L") => DetailLevel::Low,
            Some("M") => DetailLevel::Medium,
            _ => DetailLevel::High,
        }
    }
}

impl From<DetailLevel> for &'static str {
    fn from(level: DetailLevel) -> Self {
        level.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceTag {
    pub group: String,
    pub value: String,
}

impl ExperienceTag {
    pub fn new(group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
        }
    }

    /// Selection key, `group::value`.
    pub fn key(&self) -> String {
        format!("{}::{}", self.group, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Embed,
    Video,
    /// Unknown media types are kept but never rendered.
    #[default]
    #[serde(other)]
    Other,
}

impl Media {
    pub fn is_renderable(&self) -> bool {
        self.kind != MediaKind::Other && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Feed {
    #[serde(default)]
    experiences: Vec<Experience>,
}

/// Decode an experience feed document.
pub fn parse_experiences(json: &str) -> Result<Vec<Experience>, FeedError> {
    let feed: Feed = serde_json::from_str(json)?;
    Ok(feed.experiences)
}

impl Experience {
    /// Lower-cased text that free-text queries are matched against.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<String> = vec![
            self.title.clone(),
            self.subtitle.clone(),
            self.timeframe.clone(),
            self.location.clone(),
            self.summary.clone(),
        ];
        parts.extend(self.tags.iter().map(|t| format!("{} {}", t.group, t.value)));
        parts.extend(self.content.paragraphs.iter().cloned());
        parts.join(" ").to_lowercase()
    }

    pub fn matches(&self, lane: &str, query: &Query) -> bool {
        if self.bucket != lane {
            return false;
        }
        if let Some(needle) = query.needle() {
            if !self.search_text().contains(&needle) {
                return false;
            }
        }
        if query.selected_tags().is_empty() {
            return true;
        }
        let keys: HashSet<String> = self.tags.iter().map(ExperienceTag::key).collect();
        query.selected_tags().iter().all(|key| keys.contains(key))
    }

    /// Renderable media in feed order.
    pub fn media(&self) -> impl Iterator<Item = &Media> {
        self.content.media.iter().filter(|m| m.is_renderable())
    }
}

/// Experiences of `lane` matching `query`, in feed order.
pub fn filter_experiences<'a>(
    experiences: &'a [Experience],
    lane: &str,
    query: &Query,
) -> Vec<&'a Experience> {
    experiences.iter().filter(|e| e.matches(lane, query)).collect()
}

/// Tag chips for a lane: first occurrence of each key, sorted by group then value.
pub fn unique_tags<'a>(experiences: &'a [Experience], lane: &str) -> Vec<&'a ExperienceTag> {
    let mut seen = HashSet::new();
    let mut tags: Vec<&ExperienceTag> = experiences
        .iter()
        .filter(|e| e.bucket == lane)
        .flat_map(|e| e.tags.iter())
        .filter(|t| seen.insert(t.key()))
        .collect();
    tags.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.value.cmp(&b.value)));
    tags
}

/// Deep-dive lookup by slug.
pub fn find<'a>(experiences: &'a [Experience], slug: &str) -> Option<&'a Experience> {
    experiences.iter().find(|e| e.slug == slug)
}
