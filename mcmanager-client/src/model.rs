//! Domain values returned by the management server
//!
//! Server info and command execution results have no fixed schema, so they
//! are exposed as a [`DynamicMap`]: a JSON object with fallible, typed
//! accessors. A type mismatch at the point of use becomes a [`DecodeError`]
//! instead of a panic.

use mcmanager_core::{codec::json_type_name, DecodeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A mod installed on the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mod {
    /// Display name
    pub name: String,
    /// Version string as reported by the server
    pub version: String,
}

impl Mod {
    /// Create a mod entry
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Open key/value mapping returned by `systemInfo`
pub type ServerInfo = DynamicMap;

/// Open key/value mapping returned by a command execution
pub type ExecutionResult = DynamicMap;

/// JSON object with typed, fallible accessors
///
/// # Examples
///
/// ```rust
/// use mcmanager_client::DynamicMap;
/// use serde_json::json;
///
/// let info: DynamicMap = serde_json::from_value(json!({"uptime": 120, "motd": "hi"})).unwrap();
/// assert_eq!(info.get_i64("uptime").unwrap(), 120);
/// assert!(info.get_i64("motd").is_err());
/// assert!(info.get_str("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicMap(Map<String, Value>);

impl DynamicMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for `key`
    pub fn get_str(&self, key: &str) -> Result<&str, DecodeError> {
        self.typed(key, "string", Value::as_str)
    }

    /// Integer value for `key`
    ///
    /// Fails for fractional numbers and integers outside the `i64` range.
    pub fn get_i64(&self, key: &str) -> Result<i64, DecodeError> {
        self.typed(key, "integer", Value::as_i64)
    }

    /// Numeric value for `key`, integers included
    pub fn get_f64(&self, key: &str) -> Result<f64, DecodeError> {
        self.typed(key, "number", Value::as_f64)
    }

    /// Boolean value for `key`
    pub fn get_bool(&self, key: &str) -> Result<bool, DecodeError> {
        self.typed(key, "boolean", Value::as_bool)
    }

    /// Sequence value for `key`
    pub fn get_array(&self, key: &str) -> Result<&Vec<Value>, DecodeError> {
        self.typed(key, "array", Value::as_array)
    }

    /// Nested mapping for `key`
    pub fn get_object(&self, key: &str) -> Result<&Map<String, Value>, DecodeError> {
        self.typed(key, "object", Value::as_object)
    }

    /// Whether `key` is present (a JSON `null` counts as present)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Insert or overwrite a single entry, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Merge `other` into this map; entries from `other` win on conflict
    pub fn merge(&mut self, other: DynamicMap) {
        self.0.extend(other.0);
    }

    /// Unwrap into the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let value = self.0.get(key).ok_or_else(|| DecodeError::MissingField {
            path: key.to_string(),
        })?;
        extract(value).ok_or_else(|| DecodeError::WrongType {
            path: key.to_string(),
            expected,
            found: json_type_name(value),
        })
    }
}

impl From<Map<String, Value>> for DynamicMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl IntoIterator for DynamicMap {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DynamicMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DynamicMap {
        match json!({
            "uptime": 120,
            "load": 0.75,
            "name": "survival",
            "whitelist": false,
            "players": ["alice", "bob"],
            "world": {"seed": 42},
            "note": null
        }) {
            Value::Object(map) => DynamicMap::from(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_typed_accessors() {
        let info = sample();
        assert_eq!(info.get_i64("uptime").unwrap(), 120);
        assert_eq!(info.get_f64("load").unwrap(), 0.75);
        assert_eq!(info.get_f64("uptime").unwrap(), 120.0);
        assert_eq!(info.get_str("name").unwrap(), "survival");
        assert!(!info.get_bool("whitelist").unwrap());
        assert_eq!(info.get_array("players").unwrap().len(), 2);
        assert_eq!(info.get_object("world").unwrap()["seed"], 42);
    }

    #[test]
    fn test_wrong_type_reports_expected_and_found() {
        let info = sample();
        assert_eq!(
            info.get_i64("load"),
            Err(DecodeError::WrongType {
                path: "load".into(),
                expected: "integer",
                found: "number",
            })
        );
        assert_eq!(
            info.get_str("note"),
            Err(DecodeError::WrongType {
                path: "note".into(),
                expected: "string",
                found: "null",
            })
        );
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(
            sample().get_bool("pvp"),
            Err(DecodeError::MissingField { path: "pvp".into() })
        );
    }

    #[test]
    fn test_null_counts_as_present() {
        let info = sample();
        assert!(info.contains_key("note"));
        assert_eq!(info.get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_merge_overwrites_and_extends() {
        let mut info = sample();
        let mut update = DynamicMap::new();
        update.insert("uptime", json!(180));
        update.insert("tps", json!(19.9));

        info.merge(update);

        assert_eq!(info.get_i64("uptime").unwrap(), 180);
        assert_eq!(info.get_f64("tps").unwrap(), 19.9);
        assert_eq!(info.len(), 8);
    }

    #[test]
    fn test_mod_display() {
        assert_eq!(Mod::new("Forge", "14.23").to_string(), "Forge 14.23");
    }
}
