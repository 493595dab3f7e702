use thiserror::Error;

/// Errors raised while loading host configuration.
///
/// The interaction path never produces these; only config loading does, and
/// callers fall back to defaults after logging.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid aspect ratio `{raw}`, expected `width / height`")]
    AspectRatio { raw: String },
    #[error("invalid carousel config json: {0}")]
    Json(#[from] serde_json::Error),
}
