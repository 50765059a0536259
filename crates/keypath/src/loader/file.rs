//! Config file discovery and parsing
//!
//! Candidates are tried in order and the first existing non-directory
//! path wins. The parsed document is normalized into the canonical tree
//! before anything else sees it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConfigError, Result};
use crate::value::{self, Object};

/// Default config file name, tried in the working directory first.
pub const DEFAULT_FILE: &str = "config.toml";

/// Default candidate list: `./config.toml`, then
/// `/etc/<program-name>/config.toml`.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_FILE)];
    if let Some(name) = program_name() {
        candidates.push(Path::new("/etc").join(name).join(DEFAULT_FILE));
    }
    candidates
}

fn program_name() -> Option<String> {
    let exe = env::current_exe().ok()?;
    Some(exe.file_name()?.to_string_lossy().to_lowercase())
}

/// Read the first usable candidate.
///
/// Missing paths and directories are skipped; an empty or exhausted list
/// is `ConfigError::NoCandidates`. A read failure on a selected file is
/// reported, not skipped.
pub fn open_candidate(candidates: &[PathBuf]) -> Result<(PathBuf, String)> {
    for candidate in candidates {
        let Ok(meta) = fs::metadata(candidate) else {
            continue;
        };
        if meta.is_dir() {
            continue;
        }
        let content = fs::read_to_string(candidate).map_err(|e| ConfigError::Io {
            path: candidate.clone(),
            source: e,
        })?;
        return Ok((candidate.clone(), content));
    }
    Err(ConfigError::NoCandidates)
}

/// Parse TOML content into the canonical tree.
pub fn parse(content: &str, path: &Path) -> Result<Object> {
    let raw: toml::Value = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(value::normalize_document(raw))
}

/// Load a specific file.
pub fn load_file(path: &Path) -> Result<Object> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, path)
}

/// Load the first usable candidate.
pub fn load_candidates(candidates: &[PathBuf]) -> Result<Object> {
    let (path, content) = open_candidate(candidates)?;
    info!(path = %path.display(), "loading configuration");
    parse(&content, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_candidate_empty_list() {
        assert!(matches!(
            open_candidate(&[]),
            Err(ConfigError::NoCandidates)
        ));
    }

    #[test]
    fn test_open_candidate_all_missing() {
        let tmp = TempDir::new().unwrap();
        let candidates = vec![tmp.path().join("a.toml"), tmp.path().join("b.toml")];
        assert!(matches!(
            open_candidate(&candidates),
            Err(ConfigError::NoCandidates)
        ));
    }

    #[test]
    fn test_open_candidate_skips_directories() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("config.toml");
        fs::create_dir(&dir).unwrap();
        let file = tmp.path().join("fallback.toml");
        fs::write(&file, "title = \"second\"\n").unwrap();

        let (chosen, content) = open_candidate(&[dir, file.clone()]).unwrap();
        assert_eq!(chosen, file);
        assert!(content.contains("second"));
    }

    #[test]
    fn test_open_candidate_first_wins() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first.toml");
        let second = tmp.path().join("second.toml");
        fs::write(&first, "title = \"first\"\n").unwrap();
        fs::write(&second, "title = \"second\"\n").unwrap();

        let (chosen, _) = open_candidate(&[first.clone(), second]).unwrap();
        assert_eq!(chosen, first);
    }

    #[test]
    fn test_parse_error_propagates() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bad.toml");
        fs::write(&file, "title = \n").unwrap();
        assert!(matches!(
            load_file(&file),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_file_normalizes() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.toml");
        fs::write(&file, "[Database]\nPort = 5432\n").unwrap();
        let obj = load_file(&file).unwrap();
        assert!(obj.contains_key("database"));
    }
}
