use thiserror::Error;

/// Failure reported by the remote profile source.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("network error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned HTTP {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The handle cannot be a GitHub login, so no request was made.
    #[error("invalid GitHub handle {handle:?}")]
    InvalidHandle { handle: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GithubError {
    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
