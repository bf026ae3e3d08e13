//! Fetch - the document source for skimmer.
//!
//! This crate is deliberately thin: the scraping core only ever asks it
//! for `fetch(url) -> String`. It provides:
//!
//! - [`PageSource`], the trait the core consumes, so tests and embedders
//!   can supply canned content instead of hitting the network.
//! - [`HttpSource`], a plain HTTP/1.0 GET over `TcpStream` with
//!   read/write timeouts. No redirects, no TLS, no retries.
//! - [`fetch_all`], a bounded worker pool that fetches several URLs
//!   concurrently but hands the bodies back in input order, so the
//!   deterministic merge order of the pipeline is never disturbed.

mod error;
mod pool;
mod source;

pub use error::FetchError;
pub use pool::{fetch_all, DEFAULT_WORKERS};
pub use source::{HttpSource, PageSource};
