//! Walker Bookmarks
//!
//! Personal bookmarks for the Walker launcher: a SQLite bookmark store,
//! favicon downloads, launcher-driven add/delete flows, and a reconciler that
//! merges the bundled Walker template into the user's Walker configuration.

pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
pub mod favicon;
pub mod interactive;
pub mod logging;
pub mod store;
pub mod walker;
