//! CLI parse: clap types for the bookmark and merge tools. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Logging flags shared by every binary
#[derive(Args, Debug, Clone, Default)]
pub struct LoggingArgs {
    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Bookmarks CLI - personal bookmarks for the Walker launcher
#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(about = "Personal bookmark manager for the Walker launcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path (overrides storage.database_path)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Listing formats
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `id|title|url|description [tags]|favicon`, one bookmark per line
    #[default]
    Pipe,
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and schema
    Init,
    /// List all bookmarks, newest first
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Pipe)]
        format: OutputFormat,
    },
    /// Search title, url, description and tags
    Search {
        /// Search text (empty lists everything)
        #[arg(default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pipe)]
        format: OutputFormat,
    },
    /// Add a bookmark
    Add {
        url: String,
        /// Title (defaults to the URL)
        title: Option<String>,
        description: Option<String>,
        /// Space separated tags
        tags: Option<String>,
        /// Favicon file path
        favicon: Option<String>,
        /// Download a favicon when none is given
        #[arg(long)]
        fetch_favicon: bool,
    },
    /// Show a single bookmark
    Show {
        id: i64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Update fields of a bookmark
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        favicon: Option<String>,
    },
    /// Delete a bookmark by id
    Delete { id: i64 },
    /// Add a bookmark through launcher menus
    AddInteractive,
    /// Pick a bookmark to delete through launcher menus
    DeleteInteractive,
}

/// Merge the bundled Walker template into the user's Walker config
#[derive(Parser)]
#[command(name = "merge-walker-config")]
#[command(about = "Merge the bookmarks Walker template into the user's Walker configuration")]
pub struct MergeCli {
    /// Walker config to update (default: $XDG_CONFIG_HOME/walker/config.toml)
    #[arg(long)]
    pub user_config: Option<PathBuf>,

    /// Template to merge from (default: <install root>/config/walker-template.toml)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Print the merged config instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}
