//! Integration tests for walker-bookmarks

mod cli_commands;
mod config_loading;
mod reconcile_workflow;
pub mod test_utils;
