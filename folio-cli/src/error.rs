use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Feed(#[from] folio_core::FeedError),

    #[error(transparent)]
    Render(#[from] folio_render::RenderError),

    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("no experience with slug '{0}'")]
    UnknownSlug(String),
}
