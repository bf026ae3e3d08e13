//! Content units and their identifying keys.

use std::fmt;

/// Identifies one content unit within a scraper.
///
/// Content added without an explicit key gets its positional index;
/// content fetched from a URL gets the URL as its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKey {
    /// Implicit positional index.
    Index(usize),
    /// Caller-supplied key, typically the source URL.
    Named(String),
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKey::Index(i) => write!(f, "content #{i}"),
            SourceKey::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One document to be scanned for matches.
///
/// Immutable once added; the body is never touched again after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    key: SourceKey,
    body: String,
}

impl Content {
    /// Creates a content unit.
    pub fn new(key: SourceKey, body: impl Into<String>) -> Self {
        Content {
            key,
            body: body.into(),
        }
    }

    /// The identifying key.
    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    /// The raw text.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Context handed to per-field transforms.
///
/// Carries which content unit produced the raw value, so a transform
/// can, for example, resolve a relative link against its source URL.
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// Key of the content unit the match came from.
    pub key: SourceKey,
}
