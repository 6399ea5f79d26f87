//! XDG path resolution.
//!
//! `XDG_CONFIG_HOME` / `XDG_DATA_HOME` win when set to absolute paths; otherwise
//! paths fall back to `$HOME/.config` and `$HOME/.local/share`.

use crate::error::ApiError;
use std::path::PathBuf;

/// Directory name used under the XDG config and data homes.
pub const APP_NAME: &str = "walker-bookmarks";

/// Overrides the install root the bundled template is resolved from.
pub const HOME_ENV: &str = "WALKER_BOOKMARKS_HOME";

fn absolute_env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
}

fn home_dir() -> Result<PathBuf, ApiError> {
    if let Some(home) = absolute_env_dir("HOME") {
        return Ok(home);
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| ApiError::ConfigError("Cannot determine home directory".to_string()))
}

/// `$XDG_CONFIG_HOME` or `~/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    match absolute_env_dir("XDG_CONFIG_HOME") {
        Some(dir) => Ok(dir),
        None => Ok(home_dir()?.join(".config")),
    }
}

/// `$XDG_DATA_HOME` or `~/.local/share`
pub fn data_home() -> Result<PathBuf, ApiError> {
    match absolute_env_dir("XDG_DATA_HOME") {
        Some(dir) => Ok(dir),
        None => Ok(home_dir()?.join(".local").join("share")),
    }
}

pub fn app_config_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_NAME))
}

pub fn app_data_dir() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_NAME))
}

/// Global config file for this tool.
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(app_config_dir()?.join("config.toml"))
}

/// Walker's own config file.
pub fn walker_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("walker").join("config.toml"))
}

pub fn default_database_path() -> Result<PathBuf, ApiError> {
    Ok(app_data_dir()?.join("bookmarks.db"))
}

pub fn default_favicon_dir() -> Result<PathBuf, ApiError> {
    Ok(app_data_dir()?.join("favicons"))
}

/// Root of the installed tool: `$WALKER_BOOKMARKS_HOME`, else the source tree it was built from.
pub fn install_root() -> PathBuf {
    absolute_env_dir(HOME_ENV).unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

/// `<install-root>/config/walker-template.toml`
pub fn bundled_template_path() -> PathBuf {
    install_root().join("config").join("walker-template.toml")
}
