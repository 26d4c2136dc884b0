// core/value.rs

//! # Argument Value Model
//!
//! A closed set of value variants used for the baseline argument set, the
//! parsed file argument tree, and the merged result. Type checks compare
//! `ArgKind` tags; integers and floats are distinct kinds.
//!
//! Converting a `serde_yaml::Value` into an `ArgValue` is where placeholder
//! substitution happens: every string scalar (keys included) is passed through
//! the resolver on the way in.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value as YamlValue;

use crate::core::env::EnvLookup;
use crate::core::substitution::substitute_env_vars;
use crate::error::{ArgsError, ArgsResult};

/// Insertion-ordered mapping from argument name to value.
pub type ArgMap = IndexMap<String, ArgValue>;

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ArgValue>),
    Mapping(ArgMap),
}

/// The type tag of an `ArgValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Null => "null",
            ArgKind::Bool => "bool",
            ArgKind::Int => "integer",
            ArgKind::Float => "float",
            ArgKind::String => "string",
            ArgKind::Sequence => "sequence",
            ArgKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Null => ArgKind::Null,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::String(_) => ArgKind::String,
            ArgValue::Sequence(_) => ArgKind::Sequence,
            ArgValue::Mapping(_) => ArgKind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ArgMap> {
        match self {
            ArgValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Types a raw command-line value the way a YAML plain scalar would be.
    ///
    /// `32` becomes an integer, `0.1` a float, `true` a bool and `~` null.
    /// Anything that is not a scalar in YAML (e.g. `[1, 2]`) stays a string,
    /// as does text that fails to parse.
    pub fn parse_scalar(raw: &str) -> ArgValue {
        match serde_yaml::from_str::<YamlValue>(raw) {
            Ok(YamlValue::Null) if !raw.trim().is_empty() => ArgValue::Null,
            Ok(YamlValue::Bool(b)) => ArgValue::Bool(b),
            Ok(YamlValue::Number(n)) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                None if n.is_f64() => n
                    .as_f64()
                    .map(ArgValue::Float)
                    .unwrap_or_else(|| ArgValue::String(raw.to_string())),
                None => ArgValue::String(raw.to_string()),
            },
            Ok(YamlValue::String(s)) => ArgValue::String(s),
            _ => ArgValue::String(raw.to_string()),
        }
    }

    /// Converts a parsed YAML node, resolving `${NAME}` placeholders in every
    /// string scalar through `env`.
    pub fn from_yaml(value: YamlValue, env: &dyn EnvLookup) -> ArgsResult<ArgValue> {
        let converted = match value {
            YamlValue::Null => ArgValue::Null,
            YamlValue::Bool(b) => ArgValue::Bool(b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ArgValue::Int(i)
                } else if n.is_u64() {
                    return Err(ArgsError::InvalidDocument(format!(
                        "integer {} is out of range",
                        n
                    )));
                } else {
                    match n.as_f64() {
                        Some(f) => ArgValue::Float(f),
                        None => {
                            return Err(ArgsError::InvalidDocument(format!(
                                "unsupported number {}",
                                n
                            )))
                        }
                    }
                }
            }
            YamlValue::String(s) => ArgValue::String(substitute_env_vars(&s, env)?),
            YamlValue::Sequence(items) => ArgValue::Sequence(
                items
                    .into_iter()
                    .map(|item| ArgValue::from_yaml(item, env))
                    .collect::<ArgsResult<Vec<_>>>()?,
            ),
            YamlValue::Mapping(mapping) => {
                let mut map = ArgMap::with_capacity(mapping.len());
                for (key, item) in mapping {
                    let key = mapping_key(key, env)?;
                    let item = ArgValue::from_yaml(item, env)?;
                    map.insert(key, item);
                }
                ArgValue::Mapping(map)
            }
            // Tags carry no meaning for arguments
            YamlValue::Tagged(tagged) => ArgValue::from_yaml(tagged.value, env)?,
        };
        Ok(converted)
    }
}

/// Mapping keys become strings; scalar keys keep their YAML text.
fn mapping_key(key: YamlValue, env: &dyn EnvLookup) -> ArgsResult<String> {
    match key {
        YamlValue::String(s) => substitute_env_vars(&s, env),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value, env),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ArgsError::InvalidDocument(
            "mapping keys must be scalars".to_string(),
        )),
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(value: Vec<ArgValue>) -> Self {
        ArgValue::Sequence(value)
    }
}

impl From<ArgMap> for ArgValue {
    fn from(value: ArgMap) -> Self {
        ArgValue::Mapping(value)
    }
}
