//! Error types for GitHub operations

use thiserror::Error;

use crate::api::ApiError;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level failure (connection, DNS, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a status other than the one the operation expects
    #[error("GitHub API error ({status}): {detail}")]
    Api {
        /// HTTP status actually returned
        status: reqwest::StatusCode,
        /// Decoded error body, or empty if the body did not parse
        detail: ApiError,
    },

    /// Issue not found
    #[error("issue #{0} not found")]
    IssueNotFound(u64),

    /// A success response carried a body that does not match the expected payload
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A create succeeded (201) but the response carried no Location header
    #[error("issue created but response carried no Location header")]
    MissingLocation,

    /// Search followed more next-page links than the safety cap allows
    #[error("search exceeded {0} pages without exhausting results")]
    TooManyPages(usize),

    /// Repository specifier did not parse as owner/repo
    #[error("invalid repository: {0}")]
    InvalidRepo(String),
}
