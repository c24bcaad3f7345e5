use thiserror::Error;

/// Failures while decoding a feed document.
///
/// CSV feeds never fail; malformed rows are dropped during normalization. Only the JSON
/// experience feed can be rejected as a whole.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("experience feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
