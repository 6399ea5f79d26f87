//! Walker config merge binary
//!
//! Merges the bundled Walker template into the user's Walker configuration,
//! backing up the existing file first.

use bookmarks::cli::{build_logging_config, map_error, run_merge, MergeCli};
use bookmarks::config::{BookmarksConfig, ConfigLoader};
use bookmarks::logging::init_logging;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = MergeCli::parse();

    let config = match ConfigLoader::load_optional(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using defaults", e);
            BookmarksConfig::default()
        }
    };
    let logging_config = build_logging_config(config.logging.clone(), &cli.logging);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match run_merge(&cli, &config, |line| println!("{}", line)) {
        Ok(outcome) => {
            if cli.dry_run {
                print!("{}", outcome.rendered);
            }
            info!(written = outcome.written, "Merge finished");
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
