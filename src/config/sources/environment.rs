//! Environment source: `WALKER_BOOKMARKS__SECTION__KEY=value`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "WALKER_BOOKMARKS";

/// Add environment overrides to builder.
/// `WALKER_BOOKMARKS__STORAGE__DATABASE_PATH` maps to `storage.database_path`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
