//! The configuration handle
//!
//! `Config` owns the fully-overlaid tree and the query delimiter. It is
//! built once at startup and threaded to consumers by value or shared
//! reference; nothing mutates it afterwards, so concurrent reads need no
//! locking.
//!
//! Every scalar and collection accessor is total: absence and coercion
//! failure quietly yield the caller's default (or the type's zero
//! value). Only [`Config::unmarshal`] reports failure, because a missing
//! or mismatched sub-tree under a struct target is not recoverable with
//! a default.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::cast::FromValue;
use crate::error::{ConfigError, Result};
use crate::path::{self, KEY_DELIM};
use crate::value::{Object, Value};

/// Immutable, queryable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    root: Value,
    delim: char,
}

impl Config {
    pub(crate) fn new(tree: Object) -> Self {
        Self {
            root: Value::Object(tree),
            delim: KEY_DELIM,
        }
    }

    /// The raw value at a dotted key, uncoerced.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let segments = path::split_key(key, self.delim);
        path::search(&self.root, &segments)
    }

    /// Resolve and coerce, falling back to the supplied default.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> T {
        self.get(key).and_then(T::from_value).unwrap_or(default)
    }

    /// Resolve and coerce, falling back to the type's zero value.
    pub fn get_value<T: FromValue + Default>(&self, key: &str) -> T {
        self.get_or(key, T::default())
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get_value(key)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_value(key)
    }

    pub fn get_i64(&self, key: &str) -> i64 {
        self.get_value(key)
    }

    pub fn get_u64(&self, key: &str) -> u64 {
        self.get_value(key)
    }

    pub fn get_f64(&self, key: &str) -> f64 {
        self.get_value(key)
    }

    pub fn get_duration(&self, key: &str) -> Duration {
        self.get_value(key)
    }

    /// Datetime accessor; the zero value on failure is the Unix epoch.
    pub fn get_time(&self, key: &str) -> DateTime<Utc> {
        self.get_or(key, DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn get_slice(&self, key: &str) -> Vec<Value> {
        self.get_value(key)
    }

    pub fn get_int_slice(&self, key: &str) -> Vec<i64> {
        self.get_value(key)
    }

    pub fn get_string_slice(&self, key: &str) -> Vec<String> {
        self.get_value(key)
    }

    pub fn get_bool_slice(&self, key: &str) -> Vec<bool> {
        self.get_value(key)
    }

    pub fn get_duration_slice(&self, key: &str) -> Vec<Duration> {
        self.get_value(key)
    }

    /// The object at a key, empty on absence or non-object.
    pub fn get_object(&self, key: &str) -> Object {
        self.get_value(key)
    }

    /// Deserialize the sub-tree at a key into a caller struct.
    ///
    /// The tree already holds the canonical interchange representation,
    /// so this is a single deserialization step over the resolved node.
    pub fn unmarshal<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })?;
        serde_json::from_value(value).map_err(|e| ConfigError::Decode {
            key: key.to_string(),
            source: e,
        })
    }

    /// The whole tree, for inspection and dumping.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}
