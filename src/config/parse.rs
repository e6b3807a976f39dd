//! Settings file parsing and discovery

use crate::config::types::Settings;
use crate::error::{ConfigError, CogError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file names to search for
const SETTINGS_FILE_NAMES: &[&str] = &["cogctl.yml", "cogctl.yaml"];

/// Find a settings file by searching the current and parent directories
pub fn find_settings_file() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(find_settings_file_from)
        .or_else(user_settings_file)
}

/// Find a settings file starting from a specific directory
pub fn find_settings_file_from(start_dir: PathBuf) -> Option<PathBuf> {
    let mut current_dir = start_dir;

    loop {
        for file_name in SETTINGS_FILE_NAMES {
            let path = current_dir.join(file_name);
            if path.is_file() {
                return Some(path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Settings file in the per-user configuration directory, if present
pub fn user_settings_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cogctl")?;
    SETTINGS_FILE_NAMES
        .iter()
        .map(|name| dirs.config_dir().join(name))
        .find(|path| path.is_file())
}

/// Parse a settings file from a path
pub fn parse_settings_file(path: &Path) -> Result<Settings, CogError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_settings(&contents)
}

/// Parse settings from a string
pub fn parse_settings(yaml: &str) -> Result<Settings, CogError> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(yaml)?;
    Ok(settings)
}

/// Load settings from an explicit path, or discover them.
///
/// An explicit path must exist. Without one, a missing settings file yields
/// the defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<(Settings, Option<PathBuf>), CogError> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_settings_file(),
    };

    match path {
        Some(path) => Ok((parse_settings_file(&path)?, Some(path))),
        None => Ok((Settings::default(), None)),
    }
}
