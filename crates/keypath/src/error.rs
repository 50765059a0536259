//! Error types for configuration loading and access

use std::path::PathBuf;
use thiserror::Error;

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading a configuration or decoding a
/// sub-tree into a caller struct.
///
/// Typed accessors never produce these: absence and coercion failures
/// fall back to the caller's default instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No readable config file among the candidate paths
    #[error("no config file found among candidates")]
    NoCandidates,

    /// An object-typed lookup addressed a path with no value
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Failed to read a selected candidate file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse failure, propagated verbatim from the parser
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A resolved sub-tree did not deserialize into the requested type
    #[error("failed to decode {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
