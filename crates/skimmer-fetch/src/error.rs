//! Error types for page fetching.

use thiserror::Error;

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL is not one this source can handle.
    #[error("unsupported or malformed URL: {0}")]
    BadUrl(String),

    /// The underlying connection failed.
    #[error("request to {url} failed: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-200 status.
    #[error("{url} answered '{status}'")]
    Status { url: String, status: String },

    /// The response could not be split into headers and body.
    #[error("malformed HTTP response from {0}")]
    Malformed(String),
}
