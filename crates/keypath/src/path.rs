//! Path resolution over the configuration tree
//!
//! A key like `database.port` splits into segments and walks the nested
//! objects of the tree. Reads fail closed: any missing segment, or a
//! non-object value with path remaining, resolves to absence. Writes are
//! permissive: missing intermediate objects are created on the way down,
//! because environment and flag names always intend to produce an entry.

use crate::value::{Object, Value};

/// Delimiter for public query keys (`database.port`).
pub const KEY_DELIM: char = '.';
/// Delimiter for environment-variable derived paths (`DATABASE_PORT`).
pub const ENV_DELIM: char = '_';
/// Delimiter for flag derived paths (`database-port`).
pub const FLAG_DELIM: char = '-';

/// Split a raw key into lowercase path segments.
pub fn split_key(key: &str, delim: char) -> Vec<String> {
    key.to_lowercase().split(delim).map(str::to_string).collect()
}

/// Resolve a path against a tree node.
///
/// An empty path is the node itself. Resolution through a non-object
/// value yields `None`, never an error: callers treat absence the same
/// as a coercion failure and fall back to their default.
pub fn search<'a, S: AsRef<str>>(node: &'a Value, path: &[S]) -> Option<&'a Value> {
    let Some((first, rest)) = path.split_first() else {
        return Some(node);
    };
    let next = node.as_object()?.get(first.as_ref())?;
    if rest.is_empty() {
        Some(next)
    } else {
        search(next, rest)
    }
}

/// Assign a value at a path, creating intermediate objects as needed.
///
/// The final segment overwrites whatever was there. An existing
/// non-object value at an intermediate segment is replaced with a fresh
/// object, so an override always lands. An empty path does nothing.
pub fn set<S: AsRef<str>>(obj: &mut Object, path: &[S], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        obj.insert(first.as_ref().to_string(), value);
        return;
    }

    let entry = obj
        .entry(first.as_ref().to_string())
        .or_insert_with(|| Value::Object(Object::new()));
    if !entry.is_object() {
        *entry = Value::Object(Object::new());
    }
    if let Value::Object(next) = entry {
        set(next, rest, value);
    }
}
