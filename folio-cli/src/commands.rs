//! Subcommand implementations
//!
//! Each command reads its input file, runs it through the library and returns the text to
//! print. Nothing here writes to stdout, so commands stay testable without a process.

use crate::error::CliError;
use folio_config::{FolioConfig, Loader};
use folio_core::experience::{filter_experiences, find, parse_experiences, unique_tags};
use folio_core::{evaluate, Catalog, Query};
use folio_render::render_with;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options shared by the commands that read a configuration.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub config_file: Option<PathBuf>,
    pub max_tags: Option<usize>,
}

impl Settings {
    pub fn load(&self) -> Result<FolioConfig, CliError> {
        let mut loader = Loader::new();
        if let Some(path) = &self.config_file {
            loader = loader.with_file(path);
        }
        if let Some(max_tags) = self.max_tags {
            loader = loader.set_override("feed.max_tags", max_tags as u64)?;
        }
        Ok(loader.build()?)
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Filtered tile grid of one lane as JSON.
pub fn tiles(path: &Path, lane: &str, query: &Query, settings: &Settings) -> Result<String, CliError> {
    let config = settings.load()?;
    let catalog = Catalog::from_csv(&read(path)?, &config.feed.normalize_options());
    let index = catalog.index(lane);
    let result = evaluate(&index, query);
    info!(
        lane,
        tiles = catalog.len(),
        shown = result.shown_count(),
        "filtered tiles"
    );
    to_json(&result)
}

/// Tag chips of one lane, one per line.
pub fn tags(path: &Path, lane: &str, settings: &Settings) -> Result<String, CliError> {
    let config = settings.load()?;
    let catalog = Catalog::from_csv(&read(path)?, &config.feed.normalize_options());
    Ok(catalog
        .lane_tags(lane)
        .iter()
        .map(|tag| format!("{tag}\n"))
        .collect())
}

/// Matching experiences of one lane as JSON.
pub fn experiences(path: &Path, lane: &str, query: &Query) -> Result<String, CliError> {
    let all = parse_experiences(&read(path)?)?;
    let hits = filter_experiences(&all, lane, query);
    debug!(lane, total = all.len(), shown = hits.len(), "filtered experiences");
    to_json(&hits)
}

/// Tag chips of the experience feed as `group::value`, one per line.
pub fn experience_tags(path: &Path, lane: &str) -> Result<String, CliError> {
    let all = parse_experiences(&read(path)?)?;
    Ok(unique_tags(&all, lane)
        .iter()
        .map(|tag| format!("{}\n", tag.key()))
        .collect())
}

/// One experience by slug, for deep-dive pages.
pub fn experience(path: &Path, slug: &str) -> Result<String, CliError> {
    let all = parse_experiences(&read(path)?)?;
    let found = find(&all, slug).ok_or_else(|| CliError::UnknownSlug(slug.to_string()))?;
    to_json(found)
}

/// MarkdownLite file rendered to an HTML fragment.
pub fn render(path: &Path, settings: &Settings) -> Result<String, CliError> {
    let config = settings.load()?;
    let html = render_with(&read(path)?, &config.markdown.render_options())?;
    Ok(if html.is_empty() { html } else { html + "\n" })
}
