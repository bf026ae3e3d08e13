//! The regex extraction strategy.

use regex::Regex;

use crate::field::{Field, FieldId};
use crate::selectors::{MissingField, RawRecord, SelectError, Selector};

/// Extracts one raw record per regex match, with fields taken from
/// capture groups.
///
/// # Example
///
/// ```
/// use skimmer::{Field, RegexSelector, Selector};
///
/// let fields = vec![Field::new("id", 1), Field::new("name", 2)];
/// let mut selector = RegexSelector::new(r"id:(\d+) name:(\w+)", fields);
/// selector.set_content("id:1 name:Alice\nid:2 name:Bob");
///
/// let raws = selector.matches().unwrap();
/// assert_eq!(raws.len(), 2);
/// assert_eq!(raws[0].get("id"), Some("1"));
/// assert_eq!(raws[1].get("name"), Some("Bob"));
/// ```
pub struct RegexSelector {
    expression: String,
    content: String,
    fields: Vec<Field>,
    missing: MissingField,
}

impl RegexSelector {
    /// Creates a selector with the default missing-field policy
    /// ([`MissingField::Null`]).
    pub fn new(expression: impl Into<String>, fields: Vec<Field>) -> Self {
        RegexSelector {
            expression: expression.into(),
            content: String::new(),
            fields,
            missing: MissingField::default(),
        }
    }

    /// Sets the missing-field policy.
    pub fn missing_field(mut self, policy: MissingField) -> Self {
        self.missing = policy;
        self
    }
}

impl Selector for RegexSelector {
    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    fn set_expression(&mut self, expression: &str) {
        self.expression = expression.to_string();
    }

    fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn matches(&self) -> Result<Vec<RawRecord>, SelectError> {
        let pattern = Regex::new(&self.expression)?;

        let mut records = Vec::new();
        for caps in pattern.captures_iter(&self.content) {
            let mut raw = RawRecord::default();
            for field in &self.fields {
                let capture = match field.id() {
                    FieldId::Group(i) => caps.get(*i),
                    FieldId::Name(name) => caps.name(name),
                };
                match capture {
                    Some(m) => raw.insert(field.name(), m.as_str()),
                    None => match self.missing {
                        MissingField::Null => {}
                        MissingField::Fail => {
                            return Err(SelectError::FieldNotFound {
                                id: field.id().clone(),
                            });
                        }
                    },
                }
            }
            records.push(raw);
        }

        Ok(records)
    }
}
