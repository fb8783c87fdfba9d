use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Failures surfaced by the gallery core. All of them are scoped to the
/// dataset view that triggered them.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The request never produced an HTTP response (connect, timeout, body read).
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The payload did not have the expected shape.
    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// At least one delete in a batch failed. Which ones is intentionally not reported.
    #[error("failed to delete {failed} of {total} images")]
    BatchFailed { failed: usize, total: usize },
}

impl GalleryError {
    /// Transport or HTTP-level failure, as opposed to a payload or local problem.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }

    pub(crate) fn network(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
