//! CLI domain: parse, route, output, and presentation only.
//! Single route table dispatches to the store, interactive flows and the Walker merge.

mod logging;
mod output;
mod parse;
mod presentation;
mod route;

pub use logging::build_logging_config;
pub use output::map_error;
pub use parse::{Cli, Commands, LoggingArgs, MergeCli, OutputFormat};
pub use presentation::{
    format_bookmark_detail, format_bookmarks, format_pipe_line, format_reconcile_event,
    MERGE_BANNER, MERGE_DONE,
};
pub use route::{merge_paths, run_merge, RunContext};
