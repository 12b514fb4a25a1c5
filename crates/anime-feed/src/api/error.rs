//! Failure taxonomy for upstream calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a resource could not be fetched or normalized
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or connection refused
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    /// Body was not valid JSON or did not fit the expected envelope
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A node the mapper cannot do without was missing or of the wrong type
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl FetchError {
    pub fn missing(node: &str) -> Self {
        FetchError::Shape(format!("missing `{}`", node))
    }

    pub fn not_a_list(node: &str) -> Self {
        FetchError::Shape(format!("`{}` is not a list", node))
    }

    /// Short machine-friendly label, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
            FetchError::Shape(_) => "shape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            path: "/anime/home".to_string(),
        };
        assert_eq!(err.to_string(), "upstream returned 500 Internal Server Error for /anime/home");
        assert_eq!(err.kind(), "status");

        let err = FetchError::missing("data.ongoingAnimeData");
        assert_eq!(err.to_string(), "unexpected response shape: missing `data.ongoingAnimeData`");
        assert_eq!(err.kind(), "shape");

        let err = FetchError::not_a_list("data.anime");
        assert_eq!(err.to_string(), "unexpected response shape: `data.anime` is not a list");
    }

    #[test]
    fn test_decode_from_serde() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "decode");
    }
}
