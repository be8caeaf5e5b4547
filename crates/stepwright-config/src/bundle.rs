//! Flat property bundle and the [`ConfigProvider`] read contract.

use std::collections::BTreeMap;

use serde::Serialize;
use toml::Value;

use crate::error::{ConfigError, ConfigResult};

/// Read access to dotted-key configuration properties.
///
/// Implementors only supply [`property`](Self::property); the typed getters
/// are derived from it. Getters return `Ok(None)` (or an empty list) for
/// absent keys and [`ConfigError::TypeMismatch`] when a value exists but has
/// the wrong shape.
pub trait ConfigProvider: Send + Sync {
    /// Raw lookup of a property value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be consulted.
    fn property(&self, key: &str) -> ConfigResult<Option<Value>>;

    /// Whether the key is present.
    fn contains_key(&self, key: &str) -> bool {
        matches!(self.property(key), Ok(Some(_)))
    }

    /// Read a property as a string. Scalars are rendered with `to_string`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] for arrays, tables and datetimes.
    fn get_string(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.property(key)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Integer(i)) => Ok(Some(i.to_string())),
            Some(Value::Float(f)) => Ok(Some(f.to_string())),
            Some(Value::Boolean(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(type_mismatch(key, "string", &other)),
        }
    }

    /// Read a string property, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// See [`get_string`](Self::get_string).
    fn get_string_or(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_string(key)?
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Read a property as an integer. Numeric strings are parsed; a blank
    /// string counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] if the value is not an integer.
    fn get_int(&self, key: &str) -> ConfigResult<Option<i64>> {
        match self.property(key)? {
            None => Ok(None),
            Some(Value::Integer(i)) => Ok(Some(i)),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => {
                s.trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| ConfigError::TypeMismatch {
                        key: key.to_owned(),
                        expected: "integer",
                        found: "string",
                    })
            },
            Some(other) => Err(type_mismatch(key, "integer", &other)),
        }
    }

    /// Read an integer property, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// See [`get_int`](Self::get_int).
    fn get_int_or(&self, key: &str, default: i64) -> ConfigResult<i64> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    /// Read a property as an ordered list of strings.
    ///
    /// Accepts a TOML array of strings or a single string delimited by `;`
    /// or `,`. Items are trimmed and empty items dropped. Absent keys yield
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] for non-string items or tables.
    fn get_list(&self, key: &str) -> ConfigResult<Vec<String>> {
        match self.property(key)? {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(split_list(&s)),
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => {
                            let trimmed = s.trim();
                            if !trimmed.is_empty() {
                                out.push(trimmed.to_owned());
                            }
                        },
                        other => return Err(type_mismatch(key, "string list", &other)),
                    }
                }
                Ok(out)
            },
            Some(other) => Err(type_mismatch(key, "string list", &other)),
        }
    }
}

fn type_mismatch(key: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.type_str(),
    }
}

/// Split a delimited list property (`a;b`, `a, b`).
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A flat map of dotted property keys to TOML values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyBundle {
    properties: BTreeMap<String, Value>,
}

impl PropertyBundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document into a bundle, flattening nested tables.
    ///
    /// `label` names the source in parse errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if `content` is not valid TOML.
    pub fn from_toml_str(content: &str, label: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: label.to_owned(),
            source: e,
        })?;
        Ok(Self::from_table(&table))
    }

    /// Flatten a parsed TOML table into a bundle.
    #[must_use]
    pub fn from_table(table: &toml::Table) -> Self {
        let mut properties = BTreeMap::new();
        flatten_into("", table, &mut properties);
        Self { properties }
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Borrow a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Iterate keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Iterate `(key, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the bundle holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl ConfigProvider for PropertyBundle {
    fn property(&self, key: &str) -> ConfigResult<Option<Value>> {
        Ok(self.properties.get(key).cloned())
    }
}

fn flatten_into(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, Value>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(child) => flatten_into(&path, child, out),
            leaf => {
                out.insert(path, leaf.clone());
            },
        }
    }
}
