//! Config loading facade: builds the layered source stack and deserializes it.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::BookmarksConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`BookmarksConfig`] from defaults, the global file and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the standard locations.
    pub fn load() -> Result<BookmarksConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        let config: BookmarksConfig = builder.build()?.try_deserialize()?;
        debug!("Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file, replacing the global file.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<BookmarksConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;
        let config: BookmarksConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the standard locations.
    pub fn load_optional(path: Option<&Path>) -> Result<BookmarksConfig, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Location of the global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
