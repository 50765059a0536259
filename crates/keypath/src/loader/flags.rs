//! Command-line flag overlay
//!
//! The caller hands over its parsed `clap` registry and the binder walks
//! every registered named argument in registration order. A flag id
//! containing `-` produces a nested entry: `--database-port 5433` lands
//! at `database.port`, overwriting whatever the file or environment put
//! there. Arguments carrying a default value bind too, matching a flag
//! registry walk that renders unset flags at their defaults.

use clap::{ArgMatches, Command};
use tracing::debug;

use crate::path::{self, FLAG_DELIM};
use crate::value::{Object, Value};

/// Overlay parsed flags onto the tree.
///
/// Positional arguments are skipped: only named flags carry a config
/// path. The last occurrence of a repeated flag wins. Boolean flags
/// render as `"true"`/`"false"`.
pub fn bind_flags(obj: &mut Object, cmd: &Command, matches: &ArgMatches) {
    apply(obj, &render(cmd, matches));
}

/// String-render every bound named argument, in registration order.
pub fn render(cmd: &Command, matches: &ArgMatches) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for arg in cmd.get_arguments() {
        if arg.is_positional() {
            continue;
        }
        let id = arg.get_id().as_str();
        let rendered = match matches.try_get_raw(id) {
            Ok(Some(raw)) => raw.last().map(|os| os.to_string_lossy().into_owned()),
            _ => None,
        };
        if let Some(rendered) = rendered {
            pairs.push((id.to_string(), rendered));
        }
    }
    pairs
}

pub(crate) fn apply(obj: &mut Object, pairs: &[(String, String)]) {
    for (name, value) in pairs {
        let segments = path::split_key(name, FLAG_DELIM);
        path::set(obj, &segments, Value::String(value.clone()));
    }
    debug!(bound = pairs.len(), "flag overlay applied");
}
