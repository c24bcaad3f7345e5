use thiserror::Error;

/// Rendering errors. Markdown input itself never fails; only the output stage can.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTML serialization failed: {0}")]
    Serialization(#[from] std::io::Error),

    #[error("rendered HTML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
