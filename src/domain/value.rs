//! Structured value bag attached to entities (`metadata`, `parameters`).
//! Keys are order-irrelevant; values are a tagged union of scalars, lists and nested maps.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub type StructuredMap = BTreeMap<String, StructuredValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum StructuredValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<StructuredValue>),
    Map(StructuredMap),
}

/// A value that has no JSON / `Struct` encoding (non-finite floats).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {reason}")]
pub struct UnrepresentableValue {
    pub path: String,
    pub reason: String,
}

impl StructuredValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => StructuredValue::Null,
            Value::Bool(b) => StructuredValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => StructuredValue::Integer(i),
                None => StructuredValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => StructuredValue::String(s),
            Value::Array(items) => {
                StructuredValue::List(items.into_iter().map(StructuredValue::from_json).collect())
            }
            Value::Object(obj) => StructuredValue::Map(map_from_json(obj)),
        }
    }

    pub fn to_json(&self) -> Result<Value, UnrepresentableValue> {
        self.to_json_at("$")
    }

    fn to_json_at(&self, path: &str) -> Result<Value, UnrepresentableValue> {
        Ok(match self {
            StructuredValue::Null => Value::Null,
            StructuredValue::Bool(b) => Value::Bool(*b),
            StructuredValue::Integer(i) => Value::Number((*i).into()),
            StructuredValue::Float(f) => {
                let n = Number::from_f64(*f).ok_or_else(|| UnrepresentableValue {
                    path: path.to_string(),
                    reason: format!("non-finite number {}", f),
                })?;
                Value::Number(n)
            }
            StructuredValue::String(s) => Value::String(s.clone()),
            StructuredValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(item.to_json_at(&format!("{}[{}]", path, i))?);
                }
                Value::Array(out)
            }
            StructuredValue::Map(map) => Value::Object(map_to_json_at(map, path)?),
        })
    }
}

pub fn map_from_json(obj: Map<String, Value>) -> StructuredMap {
    obj.into_iter()
        .map(|(k, v)| (k, StructuredValue::from_json(v)))
        .collect()
}

/// Convert a structured map to a JSON object. `root` names the field in error paths.
pub fn map_to_json(map: &StructuredMap, root: &str) -> Result<Map<String, Value>, UnrepresentableValue> {
    map_to_json_at(map, root)
}

fn map_to_json_at(map: &StructuredMap, path: &str) -> Result<Map<String, Value>, UnrepresentableValue> {
    let mut out = Map::new();
    for (k, v) in map {
        out.insert(k.clone(), v.to_json_at(&format!("{}.{}", path, k))?);
    }
    Ok(out)
}
