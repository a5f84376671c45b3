//! Cell values, ordered records, and dataset introspection.
//!
//! A [`Record`] keeps its keys in insertion order because that order defines
//! the column layout of everything exported from it. Cells are
//! `Option<Value>`: `None` is an explicit null, distinct from an empty string.

use std::{collections::HashMap, fmt};

use anyhow::{Result, anyhow, bail};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// Insertion-ordered mapping from column name to cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Option<Value>)>,
    positions: HashMap<String, usize>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Sets `name` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        match self.positions.get(&name) {
            Some(&idx) => self.fields[idx].1 = value,
            None => {
                self.positions.insert(name.clone(), self.fields.len());
                self.fields.push((name, value));
            }
        }
    }

    /// Returns the cell stored under `name`, or `None` when the key is absent.
    pub fn get(&self, name: &str) -> Option<&Option<Value>> {
        self.positions.get(name).map(|&idx| &self.fields[idx].1)
    }

    /// Returns the value under `name`, treating absent keys and nulls alike.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Option<Value>)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Value>)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Option<Value>)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Column names of the first record, in order. Empty for an empty dataset.
pub fn get_columns(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|record| record.columns().map(str::to_string).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub records: usize,
    pub columns: usize,
}

impl DatasetStats {
    pub fn of(records: &[Record]) -> Self {
        Self {
            records: records.len(),
            columns: records.first().map(Record::len).unwrap_or(0),
        }
    }
}

/// Converts one JSON cell into a scalar. Arrays and objects are rejected.
pub fn cell_from_json(value: &serde_json::Value) -> Result<Option<Value>> {
    let cell = match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
        serde_json::Value::String(s) => Some(Value::String(s.clone())),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => {
                let f = n
                    .as_f64()
                    .ok_or_else(|| anyhow!("Number {n} cannot be represented as a float"))?;
                Some(Value::Float(f))
            }
        },
        serde_json::Value::Array(_) => bail!("nested arrays are not supported as cell values"),
        serde_json::Value::Object(_) => bail!("nested objects are not supported as cell values"),
    };
    Ok(cell)
}
