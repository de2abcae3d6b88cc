//! FILENAME: core/dataset/src/record.rs
//! PURPOSE: Record and Dataset containers plus loaders.
//! CONTEXT: A Dataset is an ordered, immutable list of records. Order matters:
//! pivot axis labels are derived in first-occurrence order.

use crate::error::DatasetError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

// ============================================================================
// RECORD
// ============================================================================

/// One row of source data: a mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: String, value: Value) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Ordered sequence of records, fixed once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Loads a dataset from a JSON array of objects.
    /// Nested arrays/objects are kept as their JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let serde_json::Value::Object(map) = item else {
                return Err(DatasetError::NotAnObject { index });
            };
            let record: Record = map
                .into_iter()
                .map(|(field, raw)| (field, json_to_value(raw)))
                .collect();
            records.push(record);
        }

        Ok(Dataset { records })
    }

    /// Loads a dataset from any reader holding a JSON array of objects.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, DatasetError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Loads a dataset from CSV. The header row supplies field names.
    /// Cells stay text (blank cells are `Empty`); numeric text is coerced
    /// only where it is summed. Short rows are accepted; their trailing
    /// fields are simply absent.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();

        for row in rdr.records() {
            let row = row?;
            let record: Record = headers
                .iter()
                .zip(row.iter())
                .map(|(field, raw)| (field, Value::from_raw(raw)))
                .collect();
            records.push(record);
        }

        Ok(Dataset { records })
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn json_to_value(raw: serde_json::Value) -> Value {
    match raw {
        serde_json::Value::Null => Value::Empty,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Empty),
        serde_json::Value::String(s) => Value::Text(s),
        other => Value::Text(other.to_string()),
    }
}
