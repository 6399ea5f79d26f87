//! CLI logging flags folded over the configured logging section.

use crate::cli::parse::LoggingArgs;
use crate::logging::LoggingConfig;

/// Precedence: CLI flags override config file override defaults.
/// Logging stays off unless `--verbose` or `--log-level` asks for it, since
/// stdout of these tools is read by the launcher.
pub fn build_logging_config(base: LoggingConfig, args: &LoggingArgs) -> LoggingConfig {
    let mut config = base;

    if args.verbose {
        config.level = "debug".to_string();
    } else if args.log_level.is_none() {
        config.level = "off".to_string();
    }
    if let Some(ref level) = args.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = args.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = args.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = args.log_file {
        config.file = Some(file.clone());
        if args.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
