//! The matcher: transform, validate and filter raw candidates.

use crate::content::{Content, MatchContext};
use crate::record::Record;
use crate::selectors::{RawRecord, SelectError, Selector};
use crate::value::Value;

/// Record-level filter predicate.
pub type RecordFilter = Box<dyn Fn(&Record) -> bool>;

/// Consumes one content unit at a time, turning raw candidates into
/// accepted result records.
///
/// Record-level failures (validation, filtering, unproductive content)
/// are never errors: the candidate is dropped and a line explaining why
/// is appended to the diagnostics log. The log is the only channel
/// carrying the "why" - a caller who ignores it simply sees fewer
/// results.
pub struct Matcher {
    selector: Box<dyn Selector>,
    filter: Option<RecordFilter>,
    logs: Vec<String>,
}

impl Matcher {
    /// Creates a matcher around an extraction strategy.
    pub fn new(selector: Box<dyn Selector>) -> Self {
        Matcher {
            selector,
            filter: None,
            logs: Vec::new(),
        }
    }

    /// Sets the record-level filter predicate.
    pub fn set_filter(&mut self, filter: RecordFilter) {
        self.filter = Some(filter);
    }

    /// The diagnostics accumulated so far.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Drops accumulated diagnostics. Called by the pipeline at the
    /// start of each execution.
    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    /// Runs the selector over one content unit and post-processes every
    /// raw candidate, preserving candidate order.
    ///
    /// A selector expression that fails to compile is absorbed into the
    /// log and yields no results. A missing field id under the
    /// fail-fast policy is the one extraction error that propagates.
    pub fn run(&mut self, content: &Content) -> Result<Vec<Record>, SelectError> {
        self.selector.set_content(content.body());

        let raws = match self.selector.matches() {
            Ok(raws) => raws,
            Err(err @ SelectError::FieldNotFound { .. }) => return Err(err),
            Err(err) => {
                self.logs.push(format!("{}: {err}", content.key()));
                return Ok(Vec::new());
            }
        };

        if raws.is_empty() {
            self.logs.push(format!(
                "{}: the content or selector expression is unproductive",
                content.key()
            ));
            return Ok(Vec::new());
        }

        let ctx = MatchContext {
            key: content.key().clone(),
        };

        let mut accepted = Vec::new();
        for raw in &raws {
            if let Some(record) = self.fetch(raw, &ctx) {
                accepted.push(record);
            }
        }
        Ok(accepted)
    }

    /// Builds a result record from one raw candidate, or rejects it.
    ///
    /// Fields are processed in declaration order and the first
    /// validation failure wins; the record is all-or-nothing.
    fn fetch(&mut self, raw: &RawRecord, ctx: &MatchContext) -> Option<Record> {
        let mut record = Record::new();

        for field in self.selector.fields() {
            let raw_value = raw.get(field.name());

            // Value as it will appear in the record.
            let value = match raw_value {
                Some(raw_str) => match field.transform() {
                    Some(apply) => apply(raw_str, ctx),
                    None => Value::Str(raw_str.to_string()),
                },
                None => Value::Null,
            };

            // Validation always runs against the raw value, independent
            // of the transform. An absent capture validates as "".
            let checked = raw_value.unwrap_or("");
            if let Some(rules) = field.rule_set() {
                if let Err(violation) = rules.check(checked) {
                    self.logs.push(format!(
                        "skipping match: validation failed for {} ({violation})",
                        field.name()
                    ));
                    return None;
                }
            }
            if let Some(predicate) = field.predicate() {
                if !predicate(checked) {
                    self.logs.push(format!(
                        "skipping match: validation failed for {}: '{checked}'",
                        field.name()
                    ));
                    return None;
                }
            }

            record.push(field.name(), value);
        }

        if let Some(filter) = &self.filter {
            if !filter(&record) {
                self.logs
                    .push(format!("filtering out match: {}", record.to_json_line()));
                return None;
            }
        }

        Some(record)
    }
}
