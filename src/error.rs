// Error types for pinpage.
// Covers GraphQL fetch failures, cache corruption, record shape and config errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinpageError {
    #[error("GitHub GraphQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Missing GRAPHQL_GITHUB_TOKEN (set it in the environment or .env)")]
    MissingToken,

    #[error("GitHub API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed GraphQL response: {0}")]
    MalformedResponse(String),

    #[error("GraphQL query failed: {0}")]
    GraphQl(String),

    #[error("Corrupt cache file {}: {source}", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unexpected record shape: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PinpageError {
    /// Whether this error came from talking to the GraphQL API.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Unauthorized
                | Self::MissingToken
                | Self::Api { .. }
                | Self::MalformedResponse(_)
                | Self::GraphQl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PinpageError>;
