//! Skimmer - extract structured records from raw text, then query them.
//!
//! Skimmer scans one or more documents (typically fetched HTML pages)
//! with a pluggable extraction strategy and runs every candidate match
//! through a uniform pipeline: per-field transformation, per-field
//! validation, whole-record filtering, multi-key ordering and
//! pagination, with optional column projection and reversal.
//!
//! # Quick Start
//!
//! ```rust
//! use skimmer::{Dir, Field, RegexSelector, Scraper, Value};
//!
//! let content = "id:1 name:Alice\nid:2 name:Bob\nid:3 name:Carol";
//!
//! let fields = vec![
//!     Field::new("id", 1).rules("integer").unwrap(),
//!     Field::new("name", 2),
//! ];
//!
//! let mut scraper = Scraper::new();
//! scraper
//!     .add_content(content)
//!     .with(Box::new(RegexSelector::new(r"id:(\d+) name:(\w+)", fields)))
//!     .filter(|record| record.get("name").and_then(Value::as_str) != Some("Bob"));
//!
//! let records = scraper.order_by("id", Dir::Desc).get().unwrap();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].get("name").unwrap().to_string(), "Carol");
//! assert_eq!(records[1].get("name").unwrap().to_string(), "Alice");
//!
//! // Bob was filtered out; the log says why.
//! assert_eq!(scraper.logs().len(), 1);
//! ```
//!
//! # Pipeline shape
//!
//! ```text
//! content units --> Selector --> raw candidates --> Matcher --> records
//!                                                      |
//!                                     transform / validate / filter
//!                                                      |
//!                    merge --> order --> skip/take --> project --> reverse
//! ```
//!
//! Data flows strictly downward; per-content results are merged in
//! insertion order before ordering and pagination, so queries are
//! deterministic and re-runnable.
//!
//! # Errors and diagnostics
//!
//! Only two conditions abort a query: no content was added
//! ([`Error::ContentNotFound`]) and no selector was configured
//! ([`Error::SelectorNotFound`]). Everything record-level - validation
//! failures, filtered-out records, content that produced no matches -
//! is absorbed into the diagnostics log ([`Scraper::logs`]) and the
//! query carries on.

mod content;
mod error;
mod field;
mod matcher;
mod ordering;
mod record;
mod scraper;
mod selectors;
mod value;

pub use content::{Content, MatchContext, SourceKey};
pub use error::{Error, Result};
pub use field::{Apply, Field, FieldId, Predicate};
pub use matcher::{Matcher, RecordFilter};
pub use ordering::{compare_records, Dir, OrderBy, Projection};
pub use record::{to_json, Record};
pub use scraper::Scraper;
pub use selectors::{MissingField, RawRecord, RegexSelector, SelectError, Selector};
pub use value::Value;

// The collaborating crates, re-exported so embedders need only one
// dependency line.
pub use skimmer_fetch::{FetchError, HttpSource, PageSource};
pub use skimmer_rules::{Rule, RuleError, RuleSet, Violation};
