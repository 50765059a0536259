//! Configuration loading from layered sources
//!
//! Sources apply in the order they are added, later sources overwriting
//! matching paths. The conventional order is file, then environment,
//! then flags, so flags win ties over the environment and both win over
//! the file.

pub mod env;
pub mod file;
pub mod flags;

use std::path::{Path, PathBuf};

use clap::{ArgMatches, Command};
use serde_json::map::Entry;

use crate::config::Config;
use crate::error::Result;
use crate::value::{Object, Value};

pub use file::{default_candidates, open_candidate, DEFAULT_FILE};

/// One layer of the configuration.
#[derive(Debug, Clone)]
enum ConfigSource {
    /// A specific file; missing is an error
    File(PathBuf),
    /// An ordered candidate list; the first readable file wins
    Candidates(Vec<PathBuf>),
    /// Process environment, optionally restricted to a prefix
    Env { prefix: Option<String> },
    /// String-rendered flags, captured at registration
    Flags(Vec<(String, String)>),
}

/// Builder for a layered configuration.
///
/// # Example
///
/// ```no_run
/// use keypath::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file("config.toml")
///     .with_env()
///     .build()?;
/// let port = config.get_or("database.port", 5432i64);
/// # Ok::<(), keypath::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a specific file layer. A missing file is a load error; use
    /// [`with_candidates`](Self::with_candidates) for best-effort lookup.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add a candidate-list layer: the first existing non-directory path
    /// is loaded, and an exhausted list is `ConfigError::NoCandidates`.
    pub fn with_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.push(ConfigSource::Candidates(
            candidates.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Overlay every process environment variable.
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Env { prefix: None });
        self
    }

    /// Overlay only `PREFIX_*` environment variables, stripping the
    /// prefix before the path is derived.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::Env {
            prefix: Some(prefix.into()),
        });
        self
    }

    /// Overlay the caller's parsed flag registry. Values are rendered to
    /// strings here, so the borrow ends with this call.
    pub fn with_flags(mut self, cmd: &Command, matches: &ArgMatches) -> Self {
        self.sources
            .push(ConfigSource::Flags(flags::render(cmd, matches)));
        self
    }

    /// Apply all layers in order and produce the immutable handle.
    pub fn build(self) -> Result<Config> {
        let mut tree = Object::new();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    overlay(&mut tree, file::load_file(&path)?);
                }
                ConfigSource::Candidates(candidates) => {
                    overlay(&mut tree, file::load_candidates(&candidates)?);
                }
                ConfigSource::Env { prefix } => {
                    env::bind_env(&mut tree, prefix.as_deref());
                }
                ConfigSource::Flags(pairs) => {
                    flags::apply(&mut tree, &pairs);
                }
            }
        }

        Ok(Config::new(tree))
    }
}

/// Deep-merge `over` into `base`: objects merge recursively, everything
/// else overwrites.
fn overlay(base: &mut Object, over: Object) {
    for (key, incoming) in over {
        match base.entry(key) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                (Value::Object(existing), Value::Object(new)) => overlay(existing, new),
                (slot_value, new) => *slot_value = new,
            },
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
        }
    }
}

impl Config {
    /// Load from the default candidate paths with the full environment
    /// overlaid — the common startup path.
    ///
    /// Flag overlays need the caller's `clap` registry and therefore go
    /// through [`ConfigBuilder::with_flags`].
    pub fn load() -> Result<Self> {
        ConfigBuilder::new()
            .with_candidates(default_candidates())
            .with_env()
            .build()
    }
}
