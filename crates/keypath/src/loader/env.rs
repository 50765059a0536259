//! Environment variable overlay
//!
//! Every `NAME=VALUE` pair becomes a write into the tree: the name is
//! lowercased and split on `_`, so `DATABASE_PORT=5433` lands at
//! `database.port`. Values stay strings; coercion happens at query time.
//!
//! With a prefix configured, only `PREFIX_*` variables are absorbed and
//! the prefix is stripped before the path is derived. That keeps
//! unrelated process environment out of the tree.

use std::env;

use tracing::debug;

use crate::path::{self, ENV_DELIM};
use crate::value::{Object, Value};

/// Overlay the process environment onto the tree.
///
/// `prefix` is matched case-insensitively against `PREFIX_` and stripped;
/// `None` absorbs every variable.
pub fn bind_env(obj: &mut Object, prefix: Option<&str>) {
    let mut bound = 0usize;
    for (name, value) in env::vars() {
        let name = name.to_lowercase();
        let name = match prefix {
            Some(p) => {
                let p = format!("{}{}", p.to_lowercase(), ENV_DELIM);
                match name.strip_prefix(&p) {
                    Some(rest) if !rest.is_empty() => rest.to_string(),
                    _ => continue,
                }
            }
            None => name,
        };
        let segments = path::split_key(&name, ENV_DELIM);
        path::set(obj, &segments, Value::String(value));
        bound += 1;
    }
    debug!(bound, "environment overlay applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Global lock to serialize env var tests
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_env_var_becomes_nested_entry() {
        let _lock = ENV_LOCK.lock().unwrap();
        env::set_var("KEYPATH_TEST_PORT", "5433");
        let mut obj = Object::new();
        bind_env(&mut obj, None);
        env::remove_var("KEYPATH_TEST_PORT");

        let root = Value::Object(obj);
        let found = path::search(&root, &["keypath", "test", "port"]).unwrap();
        assert_eq!(found.as_str(), Some("5433"));
    }

    #[test]
    fn test_prefix_filters_and_strips() {
        let _lock = ENV_LOCK.lock().unwrap();
        env::set_var("KPDEMO_HELLO_KEY1", "1000");
        env::set_var("KPDEMO_UNRELATED", "x");
        env::set_var("OTHER_HELLO_KEY1", "9");
        let mut obj = Object::new();
        bind_env(&mut obj, Some("KPDEMO"));
        env::remove_var("KPDEMO_HELLO_KEY1");
        env::remove_var("KPDEMO_UNRELATED");
        env::remove_var("OTHER_HELLO_KEY1");

        let root = Value::Object(obj);
        assert_eq!(
            path::search(&root, &["hello", "key1"]).unwrap().as_str(),
            Some("1000")
        );
        assert_eq!(
            path::search(&root, &["unrelated"]).unwrap().as_str(),
            Some("x")
        );
        assert!(path::search(&root, &["other", "hello", "key1"]).is_none());
    }

    #[test]
    fn test_env_overwrites_file_value() {
        let _lock = ENV_LOCK.lock().unwrap();
        let mut obj = Object::new();
        path::set(&mut obj, &["hello", "key1"], Value::from(1));
        env::set_var("HELLO_KEY1", "1000");
        bind_env(&mut obj, None);
        env::remove_var("HELLO_KEY1");

        let root = Value::Object(obj);
        assert_eq!(
            path::search(&root, &["hello", "key1"]).unwrap().as_str(),
            Some("1000")
        );
    }
}
