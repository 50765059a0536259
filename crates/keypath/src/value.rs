//! Canonical configuration tree representation
//!
//! The loader parses TOML into the parser's own tree type and immediately
//! converts it into one canonical nested-mapping representation, so the
//! path resolver and the accessors only ever see a single node type.

use serde_json::Number;

/// A node in the configuration tree: scalar, array, or nested object.
pub type Value = serde_json::Value;

/// A mapping node. Keys are lowercase after normalization.
pub type Object = serde_json::Map<String, Value>;

/// Convert a parsed TOML document into the canonical tree.
///
/// Map keys are lowercased (queries are case-insensitive) and datetimes
/// become their string rendering; coercion back to a richer type happens
/// lazily at query time, like every other string in the tree.
pub fn normalize(raw: toml::Value) -> Value {
    match raw {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => match Number::from_f64(f) {
            Some(n) => Value::Number(n),
            None => Value::Null,
        },
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), normalize(v)))
                .collect(),
        ),
    }
}

/// Normalize a whole document to its root object.
///
/// TOML documents are always tables at the top level, so this cannot miss
/// in practice; a non-table root yields an empty object.
pub fn normalize_document(raw: toml::Value) -> Object {
    match normalize(raw) {
        Value::Object(obj) => obj,
        _ => Object::new(),
    }
}
