//! Configuration tree values.
//!
//! Documents are decoded with `serde_yaml` and then converted into [`Value`],
//! a closed set of variants that the navigator, resolver and coercer match on.

use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A mapping node in the configuration tree.
pub type Mapping = BTreeMap<String, Value>;

/// A single node in the configuration tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Convert a decoded YAML node. `name` identifies the document in errors.
    pub fn from_yaml(name: &str, yaml: serde_yaml::Value) -> ConfigResult<Self> {
        Ok(match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    // u64 beyond i64::MAX, or a real float
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| Value::from_yaml(name, item))
                    .collect::<ConfigResult<_>>()?,
            ),
            serde_yaml::Value::Mapping(map) => Value::Mapping(mapping_from_yaml(name, map)?),
            // Tags carry no meaning for lookups; keep the tagged value.
            serde_yaml::Value::Tagged(tagged) => Value::from_yaml(name, tagged.value)?,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

/// Convert a YAML mapping, stringifying scalar keys.
pub(crate) fn mapping_from_yaml(name: &str, map: serde_yaml::Mapping) -> ConfigResult<Mapping> {
    let mut out = Mapping::new();
    for (key, value) in map {
        let key = key_to_string(name, key)?;
        out.insert(key, Value::from_yaml(name, value)?);
    }
    Ok(out)
}

fn key_to_string(name: &str, key: serde_yaml::Value) -> ConfigResult<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => key_to_string(name, tagged.value),
        other => Err(ConfigError::not_mapping(
            name,
            format!("unsupported mapping key: {:?}", other),
        )),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(_) | Value::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}
