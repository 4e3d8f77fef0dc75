use std::fs;
use std::path::{Path, PathBuf};

use super::ImplensConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".implens.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn parse_config(contents: &str, path: &Path) -> Result<ImplensConfig> {
    toml::from_str(contents)
        .map_err(|e| Error::Configuration(format!("failed to parse {}: {e}", path.display())))
}

/// Load an explicitly requested config file. Unlike discovery, a missing
/// or malformed file is an error.
pub fn load_config_from(path: &Path) -> Result<ImplensConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::file_system(path, e))?;
    let config = parse_config(&contents, path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<ImplensConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Absence is the normal case while walking up.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to read config file"
                );
            }
            return None;
        }
    };

    match parse_config(&contents, config_path) {
        Ok(config) => {
            tracing::debug!(path = %config_path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "using default config");
            None
        }
    }
}

/// `start` followed by its parents, at most `max_depth` directories.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.implens.toml`.
pub fn load_config_in(start: PathBuf) -> ImplensConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                depth = MAX_TRAVERSAL_DEPTH,
                "no config found, using default config"
            );
            ImplensConfig::default()
        })
}

/// Search the current directory and its ancestors for `.implens.toml`.
pub fn load_config() -> ImplensConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_in(dir),
        Err(e) => {
            tracing::warn!(error = %e, "failed to get current directory, using default config");
            ImplensConfig::default()
        }
    }
}
