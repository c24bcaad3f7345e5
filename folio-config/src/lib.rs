//! Shared configuration loader for folio.
//!
//! `defaults/folio.default.toml` is embedded into every binary so the documented defaults
//! and runtime behavior stay in sync. Applications layer user files and overrides on top
//! via [`Loader`] before deserializing into [`FolioConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use folio_core::NormalizeOptions;
use folio_render::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Top-level configuration consumed by folio applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub feed: FeedConfig,
    pub markdown: MarkdownConfig,
}

/// Spreadsheet feed normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub max_tags: usize,
    pub default_sort: i64,
    pub default_child_order: i64,
}

impl FeedConfig {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            max_tags: self.max_tags,
            default_sort: self.default_sort,
            default_child_order: self.default_child_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub base_heading_level: u8,
}

impl MarkdownConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            base_heading_level: self.base_heading_level,
        }
    }
}

/// Builds a [`FolioConfig`] from the embedded defaults plus any user layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only `folio.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file on top of the current layers. `build` fails if it doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Like [`Loader::with_file`], but a missing file is skipped.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key (`feed.max_tags`) above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers, deserialize and check value ranges.
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        let config: FolioConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl FolioConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.markdown.base_heading_level) {
            return Err(ConfigError::Message(format!(
                "markdown.base_heading_level must be between 1 and 6, got {}",
                self.markdown.base_heading_level
            )));
        }
        Ok(())
    }
}

/// The built-in defaults, with no user layers.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}
