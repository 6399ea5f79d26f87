//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the global file, then the
//! environment.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default(
            "favicon.connect_timeout_secs",
            crate::config::default_connect_timeout_secs(),
        )?
        .set_default(
            "favicon.request_timeout_secs",
            crate::config::default_request_timeout_secs(),
        )?
        .set_default(
            "desktop.notify_command",
            crate::config::default_notify_command(),
        )?
        .set_default(
            "desktop.clipboard_command",
            crate::config::default_clipboard_command(),
        )?
        .set_default("logging.level", "info")
}
