//! Field configuration: what to extract and how to treat it.

use std::fmt;

use skimmer_rules::{RuleError, RuleSet};

use crate::content::MatchContext;
use crate::value::Value;

/// Strategy-specific identifier for a field within a match.
///
/// For the regex selector this is a capture group: either a positional
/// index or a named group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldId {
    /// Capture group by index. Group 0 is the whole match.
    Group(usize),
    /// Capture group by name.
    Name(String),
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Group(i) => write!(f, "group {i}"),
            FieldId::Name(name) => write!(f, "group '{name}'"),
        }
    }
}

impl From<usize> for FieldId {
    fn from(i: usize) -> Self {
        FieldId::Group(i)
    }
}

impl From<&str> for FieldId {
    fn from(name: &str) -> Self {
        FieldId::Name(name.to_string())
    }
}

impl From<String> for FieldId {
    fn from(name: String) -> Self {
        FieldId::Name(name)
    }
}

/// Transform applied to a raw value before it enters the result record.
pub type Apply = Box<dyn Fn(&str, &MatchContext) -> Value>;

/// Caller-supplied validation predicate over the raw value.
pub type Predicate = Box<dyn Fn(&str) -> bool>;

/// Configuration for one extracted field.
///
/// Transformation and validation are independent axes: `apply` shapes
/// the value that ends up in the record, while `rules` and `validate`
/// are always checked against the raw extracted string.
///
/// # Example
///
/// ```
/// use skimmer::{Field, Value};
///
/// let fields = vec![
///     Field::new("id", 1).rules("integer").unwrap(),
///     Field::new("name", 2).validate(|raw| !raw.is_empty()),
///     Field::new("score", 3).apply(|raw, _ctx| {
///         raw.parse::<i64>().map(Value::Int).unwrap_or(Value::Null)
///     }),
/// ];
/// assert_eq!(fields.len(), 3);
/// ```
pub struct Field {
    name: String,
    id: FieldId,
    apply: Option<Apply>,
    rules: Option<RuleSet>,
    validate: Option<Predicate>,
}

impl Field {
    /// Creates a field mapping `name` to the given id.
    pub fn new(name: impl Into<String>, id: impl Into<FieldId>) -> Self {
        Field {
            name: name.into(),
            id: id.into(),
            apply: None,
            rules: None,
            validate: None,
        }
    }

    /// Sets a transform for this field's value.
    pub fn apply(mut self, f: impl Fn(&str, &MatchContext) -> Value + 'static) -> Self {
        self.apply = Some(Box::new(f));
        self
    }

    /// Parses and attaches a validation rule spec, e.g. `"integer|min:1"`.
    pub fn rules(mut self, spec: &str) -> Result<Self, RuleError> {
        self.rules = Some(RuleSet::parse(spec)?);
        Ok(self)
    }

    /// Attaches a validation predicate over the raw value.
    pub fn validate(mut self, p: impl Fn(&str) -> bool + 'static) -> Self {
        self.validate = Some(Box::new(p));
        self
    }

    /// The field's name, unique within a configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strategy-specific field id.
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// The transform, if any.
    pub fn transform(&self) -> Option<&Apply> {
        self.apply.as_ref()
    }

    /// The parsed rule set, if any.
    pub fn rule_set(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    /// The validation predicate, if any.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.validate.as_ref()
    }
}
