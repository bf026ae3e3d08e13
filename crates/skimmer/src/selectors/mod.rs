//! Selectors: pluggable strategies that turn raw content into candidate
//! records.
//!
//! A selector is fed content, an extraction expression and a field
//! configuration, and produces one [`RawRecord`] per match occurrence.
//! Only the regex strategy ships, but the [`Selector`] contract is what
//! the rest of the pipeline consumes, so other strategies plug in the
//! same way.

use std::collections::HashMap;

use thiserror::Error;

use crate::field::{Field, FieldId};

pub mod regex;

pub use self::regex::RegexSelector;

/// One un-validated, un-transformed match extracted from content.
///
/// Maps field names (from the configuration) to the raw captured
/// strings. A field configured with the null missing-field policy may
/// be absent here; the matcher treats absence as a null value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    values: HashMap<String, String>,
}

impl RawRecord {
    /// Stores a raw value for a field name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up the raw value for a field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What to do when a configured field id has no captured value in a
/// given match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingField {
    /// Leave the field absent; the record carries a null for it.
    #[default]
    Null,
    /// Fail the extraction with [`SelectError::FieldNotFound`].
    Fail,
}

/// Errors a selector can produce.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The extraction expression does not compile.
    ///
    /// The matcher absorbs this into the diagnostics log; it is not
    /// fatal to the pipeline.
    #[error("invalid selector expression: {0}")]
    BadExpression(#[from] ::regex::Error),

    /// A configured field id had no captured value and the selector's
    /// missing-field policy is [`MissingField::Fail`].
    #[error("the match with id {id} does not exist in the selector")]
    FieldNotFound { id: FieldId },
}

/// A pluggable extraction strategy.
///
/// Setters only store state; [`matches`](Selector::matches) is pure
/// given that state and may be called repeatedly with identical output.
pub trait Selector {
    /// Replaces the content to scan.
    fn set_content(&mut self, content: &str);

    /// Replaces the extraction expression. No syntax validation happens
    /// here; a bad expression surfaces from `matches`.
    fn set_expression(&mut self, expression: &str);

    /// Replaces the field configuration.
    fn set_fields(&mut self, fields: Vec<Field>);

    /// The current field configuration, in declaration order.
    fn fields(&self) -> &[Field];

    /// Runs the strategy over the content, producing one raw record per
    /// match occurrence. Zero matches is an empty vec, not an error.
    fn matches(&self) -> Result<Vec<RawRecord>, SelectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_basics() {
        let mut raw = RawRecord::default();
        assert!(raw.is_empty());
        raw.insert("id", "1");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get("id"), Some("1"));
        assert_eq!(raw.get("name"), None);
    }

    #[test]
    fn missing_field_defaults_to_null() {
        assert_eq!(MissingField::default(), MissingField::Null);
    }
}
