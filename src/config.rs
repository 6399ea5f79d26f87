//! Configuration System
//!
//! Layered configuration for the bookmark manager: built-in defaults, the
//! global config file under the XDG config home, then `WALKER_BOOKMARKS__*`
//! environment variables. Paths left unset resolve to XDG locations at use time.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;

/// XDG path helpers
pub mod xdg {
    pub use super::paths::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarksConfig {
    /// Database and favicon cache locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Favicon download settings
    #[serde(default)]
    pub favicon: FaviconConfig,

    /// Walker config merge locations
    #[serde(default)]
    pub walker: WalkerConfig,

    /// External desktop commands used by the interactive flows
    #[serde(default)]
    pub desktop: DesktopConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file (default: `$XDG_DATA_HOME/walker-bookmarks/bookmarks.db`)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Directory downloaded favicons are written to
    #[serde(default)]
    pub favicon_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_database_path(&self) -> Result<PathBuf, ApiError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => xdg::default_database_path(),
        }
    }

    pub fn resolve_favicon_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.favicon_dir {
            Some(path) => Ok(path.clone()),
            None => xdg::default_favicon_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaviconConfig {
    /// Third-party favicon services tried after the site's own `/favicon.ico`.
    /// `{domain}` is replaced with the bookmark's host.
    #[serde(default = "default_favicon_services")]
    pub services: Vec<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

pub(crate) fn default_favicon_services() -> Vec<String> {
    vec![
        "https://www.google.com/s2/favicons?domain={domain}&sz=64".to_string(),
        "https://icons.duckduckgo.com/ip3/{domain}.ico".to_string(),
    ]
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    5
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            services: default_favicon_services(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Walker's own config file (default: `$XDG_CONFIG_HOME/walker/config.toml`)
    #[serde(default)]
    pub user_config_path: Option<PathBuf>,

    /// Template merged into the Walker config (default: bundled `config/walker-template.toml`)
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl WalkerConfig {
    pub fn resolve_user_config_path(&self) -> Result<PathBuf, ApiError> {
        match &self.user_config_path {
            Some(path) => Ok(path.clone()),
            None => xdg::walker_config_path(),
        }
    }

    pub fn resolve_template_path(&self) -> PathBuf {
        self.template_path
            .clone()
            .unwrap_or_else(xdg::bundled_template_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// Menu command (program followed by arguments); options arrive on stdin
    #[serde(default = "default_dmenu_command")]
    pub dmenu_command: Vec<String>,

    #[serde(default = "default_notify_command")]
    pub notify_command: String,

    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: String,
}

fn default_dmenu_command() -> Vec<String> {
    vec!["walker".to_string(), "--dmenu".to_string()]
}

pub(crate) fn default_notify_command() -> String {
    "notify-send".to_string()
}

pub(crate) fn default_clipboard_command() -> String {
    "wl-paste".to_string()
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            dmenu_command: default_dmenu_command(),
            notify_command: default_notify_command(),
            clipboard_command: default_clipboard_command(),
        }
    }
}

impl BookmarksConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.desktop.dmenu_command.is_empty() {
            errors.push("desktop.dmenu_command cannot be empty".to_string());
        }
        if self.desktop.notify_command.trim().is_empty() {
            errors.push("desktop.notify_command cannot be empty".to_string());
        }
        if self.favicon.request_timeout_secs == 0 {
            errors.push("favicon.request_timeout_secs must be greater than zero".to_string());
        }
        for service in &self.favicon.services {
            if !service.starts_with("http://") && !service.starts_with("https://") {
                errors.push(format!("favicon service is not an http(s) URL: {}", service));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
