//! Ordered record datasets with schema validation.
//!
//! A [`Dataset`] is an ordered sequence of [`Record`]s sharing one field set.
//! Construction validates the schema up front: every record must carry
//! exactly the fields of its siblings, so downstream encodings can rely on
//! uniform access. Values are immutable after construction.

use crate::error::{Error, Result};

/// A single field value: quantitative or categorical.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text (category) value.
    Text(String),
}

impl Value {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Number(_) => None,
        }
    }

    /// Render the value as display text.
    ///
    /// Whole numbers print without a fractional part.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            Value::Number(n) => format!("{n}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One row: an insertion-ordered set of named fields.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Later fields with a duplicate name replace earlier ones.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in insertion order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// An ordered, immutable sequence of records sharing one field set.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    fields: Vec<String>,
}

impl Dataset {
    /// Build a dataset from literal records, validating the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if any record is missing a field
    /// present in its siblings or carries a field the first record lacks.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let fields: Vec<String> = records
            .first()
            .map(|r| r.field_names().iter().map(|s| (*s).to_string()).collect())
            .unwrap_or_default();

        for (idx, record) in records.iter().enumerate() {
            for field in &fields {
                if record.get(field).is_none() {
                    return Err(Error::SchemaMismatch {
                        field: field.clone(),
                        detail: format!("missing from record {idx}"),
                    });
                }
            }
            for name in record.field_names() {
                if !fields.iter().any(|f| f == name) {
                    return Err(Error::SchemaMismatch {
                        field: name.to_string(),
                        detail: format!("present in record {idx} but not in record 0"),
                    });
                }
            }
        }

        Ok(Self { records, fields })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether a field exists in the schema.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Field names of the schema.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// All numeric values of a field, in record order.
    ///
    /// Non-numeric values are skipped.
    #[must_use]
    pub fn numbers(&self, field: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.get(field).and_then(Value::as_number))
            .collect()
    }

    /// All text values of a field, in record order.
    #[must_use]
    pub fn texts(&self, field: &str) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.get(field).and_then(|v| v.as_text().map(String::from)))
            .collect()
    }

    /// Distinct text values of a field, in first-appearance order.
    #[must_use]
    pub fn distinct_texts(&self, field: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for text in self.texts(field) {
            if !seen.contains(&text) {
                seen.push(text);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_rows() -> Vec<Record> {
        vec![
            Record::new().field("quality", 70.0).field("noise", "Low (SD=15)"),
            Record::new().field("quality", 80.0).field("noise", "High (SD=45)"),
        ]
    }

    #[test]
    fn test_dataset_valid_schema() {
        let ds = Dataset::new(two_rows()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_field("quality"));
        assert!(ds.has_field("noise"));
        assert!(!ds.has_field("probability"));
    }

    #[test]
    fn test_dataset_missing_field_fails() {
        let rows = vec![
            Record::new().field("quality", 70.0).field("noise", "Low"),
            Record::new().field("quality", 80.0),
        ];
        let err = Dataset::new(rows).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { ref field, .. } if field == "noise"));
    }

    #[test]
    fn test_dataset_extra_field_fails() {
        let rows = vec![
            Record::new().field("quality", 70.0),
            Record::new().field("quality", 80.0).field("noise", "Low"),
        ];
        let err = Dataset::new(rows).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { ref field, .. } if field == "noise"));
    }

    #[test]
    fn test_dataset_empty_is_valid() {
        let ds = Dataset::new(Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.fields().is_empty());
    }

    #[test]
    fn test_numbers_in_record_order() {
        let ds = Dataset::new(two_rows()).unwrap();
        assert_eq!(ds.numbers("quality"), vec![70.0, 80.0]);
    }

    #[test]
    fn test_numbers_skips_text() {
        let ds = Dataset::new(two_rows()).unwrap();
        assert!(ds.numbers("noise").is_empty());
    }

    #[test]
    fn test_distinct_texts_first_appearance_order() {
        let rows = vec![
            Record::new().field("noise", "Low"),
            Record::new().field("noise", "High"),
            Record::new().field("noise", "Low"),
        ];
        let ds = Dataset::new(rows).unwrap();
        assert_eq!(ds.distinct_texts("noise"), vec!["Low", "High"]);
    }

    #[test]
    fn test_record_duplicate_field_replaces() {
        let r = Record::new().field("x", 1.0).field("x", 2.0);
        assert_eq!(r.get("x").and_then(Value::as_number), Some(2.0));
        assert_eq!(r.field_names(), vec!["x"]);
    }

    #[test]
    fn test_value_render() {
        assert_eq!(Value::Number(70.0).render(), "70");
        assert_eq!(Value::Number(26.8).render(), "26.8");
        assert_eq!(Value::Text("abc".into()).render(), "abc");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3).as_number(), Some(3.0));
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(Value::from(String::from("hi")).as_text(), Some("hi"));
    }

    proptest! {
        // Any set of records built from the same field list passes the
        // schema check, and every schema field is readable from every record.
        #[test]
        fn prop_uniform_records_validate(
            names in proptest::collection::vec("[a-z]{1,8}", 1..5),
            rows in 1usize..6,
        ) {
            let mut unique = names.clone();
            unique.sort();
            unique.dedup();

            let records: Vec<Record> = (0..rows)
                .map(|i| {
                    unique.iter().fold(Record::new(), |r, n| {
                        r.field(n, i as f64)
                    })
                })
                .collect();

            let ds = Dataset::new(records).unwrap();
            for field in ds.fields() {
                prop_assert_eq!(ds.numbers(field).len(), rows);
            }
        }

        // Dropping one field from one record always fails validation.
        #[test]
        fn prop_dropped_field_fails(rows in 2usize..6, victim in 0usize..6) {
            let victim = victim % rows;
            let records: Vec<Record> = (0..rows)
                .map(|i| {
                    let r = Record::new().field("a", i as f64);
                    if i == victim {
                        r
                    } else {
                        r.field("b", i as f64)
                    }
                })
                .collect();

            // When the victim is record 0, "b" is an extra field elsewhere;
            // otherwise it is missing from the victim. Either way: mismatch.
            prop_assert!(Dataset::new(records).is_err());
        }
    }
}
