//! Bookmarks CLI Binary
//!
//! Command-line interface for the bookmark store and the launcher flows.

use bookmarks::cli::{build_logging_config, map_error, Cli, RunContext};
use bookmarks::config::ConfigLoader;
use bookmarks::logging::init_logging;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let base = ConfigLoader::load_optional(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();
    let logging_config = build_logging_config(base, &cli.logging);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Bookmarks CLI starting");

    let context = match RunContext::new(cli.config.as_deref(), cli.database.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error opening bookmark store: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
