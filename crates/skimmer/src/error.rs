//! Error types for the scraping pipeline.

use thiserror::Error;

use crate::selectors::SelectError;
use skimmer_fetch::FetchError;

/// Fatal pipeline errors.
///
/// Only structural problems abort a query; record-level failures are
/// routed to the diagnostics log instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No URL or content was added before querying.
    #[error("no URL or content was given to scrape")]
    ContentNotFound,

    /// No selector was configured before querying.
    #[error("no selector was specified; call with() before querying")]
    SelectorNotFound,

    /// The selector reported a fatal extraction error.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Fetching a URL failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
