use thiserror::Error;

/// Error type for calls to the prediction service
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Client could not be built from the configuration
    #[error("Upstream configuration error: {0}")]
    Config(String),

    /// Request never produced a response (connect, timeout, TLS)
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Service answered but the body could not be understood
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// Whether the service was reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, UpstreamError::Transport(_))
    }
}
