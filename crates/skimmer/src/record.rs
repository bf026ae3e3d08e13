//! Result records: ordered field-name/value mappings.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// One validated, transformed, filter-accepted output record.
///
/// Field order is the declaration order of the field configuration, and
/// every configured field name is present; partial records are never
/// emitted by the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Appends a field. Order of insertion is preserved.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// Looks up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates field names in record order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates `(name, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Restricts the record to the given columns.
    ///
    /// The record's own field order is preserved; columns that the
    /// record does not carry are simply absent from the projection.
    pub fn project(&self, columns: &[String]) -> Record {
        Record {
            fields: self
                .fields
                .iter()
                .filter(|(n, _)| columns.iter().any(|c| c == n))
                .cloned()
                .collect(),
        }
    }

    /// Renders the record as a single-line JSON object, for log lines.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serializes a result set as pretty-printed JSON.
pub fn to_json(records: &[Record]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::new();
        record.push("name", Value::from("Alice"));
        record.push("id", Value::from("1"));
        record
    }

    #[test]
    fn push_and_get() {
        let record = sample();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name"), Some(&Value::from("Alice")));
        assert_eq!(record.get("id"), Some(&Value::from("1")));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn names_preserve_insertion_order() {
        let record = sample();
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["name", "id"]);
    }

    #[test]
    fn project_keeps_record_order() {
        let record = sample();
        // Columns listed in a different order than the record's fields.
        let projected = record.project(&["id".to_string(), "name".to_string()]);
        let names: Vec<&str> = projected.names().collect();
        assert_eq!(names, vec!["name", "id"]);

        let only_id = record.project(&["id".to_string()]);
        assert_eq!(only_id.len(), 1);
        assert_eq!(only_id.get("name"), None);
    }

    #[test]
    fn project_ignores_unknown_columns() {
        let record = sample();
        let projected = record.project(&["nope".to_string()]);
        assert!(projected.is_empty());
    }

    #[test]
    fn json_object_keeps_field_order() {
        let record = sample();
        assert_eq!(record.to_json_line(), r#"{"name":"Alice","id":"1"}"#);
    }

    #[test]
    fn result_set_serializes_as_array() {
        let records = vec![sample(), sample()];
        let json = to_json(&records).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"Alice\""));
    }
}
