//! Dotted-path configuration access over TOML
//!
//! This crate loads a TOML document, overlays environment variables and
//! command-line flags onto it, and answers typed queries over a dotted
//! key namespace:
//! - `database.port` walks nested tables; keys are case-insensitive
//! - `DATABASE_PORT=5433` in the environment overrides the file
//! - `--database-port 5433` on the command line overrides both
//!
//! Typed accessors never fail: a missing key or an unconvertible value
//! falls back to the caller's default.
//!
//! # Example
//!
//! ```no_run
//! use keypath::Config;
//!
//! // ./config.toml, then /etc/<program>/config.toml; environment overlaid
//! let config = Config::load()?;
//!
//! let port = config.get_or("database.port", 5432i64);
//! let timeout = config.get_duration("server.read_timeout");
//! # Ok::<(), keypath::ConfigError>(())
//! ```

pub mod cast;
pub mod config;
pub mod error;
pub mod loader;
pub mod path;
pub mod value;

pub use cast::FromValue;
pub use config::Config;
pub use error::{ConfigError, Result};
pub use loader::env::bind_env;
pub use loader::flags::bind_flags;
pub use loader::{default_candidates, open_candidate, ConfigBuilder, DEFAULT_FILE};
pub use path::{ENV_DELIM, FLAG_DELIM, KEY_DELIM};
pub use value::{Object, Value};
