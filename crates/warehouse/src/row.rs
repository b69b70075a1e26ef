//! Dynamically shaped result rows.
//!
//! The warehouse boundary returns rows as column-name → value maps so the
//! same client serves both the tool-breakdown query and the denominator
//! query. Large warehouses frequently serialize 64-bit integers as JSON
//! strings, so the numeric accessors tolerate stringified numbers.

use board_core::{Error, Result};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

/// One result row: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseRow {
    columns: BTreeMap<String, Value>,
}

impl WarehouseRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion, used heavily by tests and fakes.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.columns.insert(name.into(), value);
        self
    }

    /// Convert one JSONEachRow line into a row.
    pub fn from_json(json: JsonValue) -> Result<Self> {
        let object = match json {
            JsonValue::Object(map) => map,
            other => {
                return Err(Error::warehouse(format!(
                    "expected a JSON object row, got: {}",
                    other
                )))
            }
        };

        let mut columns = BTreeMap::new();
        for (name, value) in object {
            let value = match value {
                JsonValue::String(s) => Value::Text(s),
                JsonValue::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Value::Int(i)
                    } else {
                        Value::Float(n.as_f64().unwrap_or(f64::NAN))
                    }
                }
                JsonValue::Bool(b) => Value::Int(i64::from(b)),
                JsonValue::Null => Value::Null,
                other => {
                    return Err(Error::warehouse(format!(
                        "unsupported value in column '{}': {}",
                        name, other
                    )))
                }
            };
            columns.insert(name, value);
        }

        Ok(Self { columns })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Ok(s),
            Some(other) => Err(Error::missing_column(format!(
                "{} (expected text, got {:?})",
                name, other
            ))),
            None => Err(Error::missing_column(name)),
        }
    }

    pub fn require_u64(&self, name: &str) -> Result<u64> {
        match self.get(name) {
            Some(Value::Int(i)) if *i >= 0 => Ok(*i as u64),
            Some(Value::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::missing_column(format!("{} (unparseable count '{}')", name, s))),
            Some(other) => Err(Error::missing_column(format!(
                "{} (expected count, got {:?})",
                name, other
            ))),
            None => Err(Error::missing_column(name)),
        }
    }

    pub fn require_f64(&self, name: &str) -> Result<f64> {
        match self.get(name) {
            Some(Value::Float(f)) => Ok(*f),
            Some(Value::Int(i)) => Ok(*i as f64),
            Some(Value::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::missing_column(format!("{} (unparseable float '{}')", name, s))),
            Some(other) => Err(Error::missing_column(format!(
                "{} (expected float, got {:?})",
                name, other
            ))),
            None => Err(Error::missing_column(name)),
        }
    }
}
