//! Walker launcher config reconciliation.
//!
//! Merges the bundled Walker config template into the user's
//! `~/.config/walker/config.toml` without ever dropping user data.

pub mod document;
pub mod merge;
pub mod workflow;

pub use merge::{
    reconcile, reconcile_providers, union_action_groups, union_prefix_bindings, union_sequence,
};
pub use workflow::{
    ReconcileEvent, ReconcileOptions, ReconcileOutcome, ReconcilePaths, WalkerConfigMerger,
};
