//! Global config file source: $XDG_CONFIG_HOME/walker-bookmarks/config.toml
//! or ~/.config/walker-bookmarks/config.toml

use crate::config::xdg;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file, if a config home can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    xdg::global_config_path().ok()
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.exists() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        } else {
            debug!(
                config_path = %path.display(),
                "No global config file, using defaults"
            );
        }
    }
    Ok(builder)
}
