//! CLI presentation: bookmark listings and merge progress lines.

use crate::cli::parse::OutputFormat;
use crate::error::ApiError;
use crate::store::Bookmark;
use crate::walker::ReconcileEvent;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub const MERGE_BANNER: &str = "=== Merging Walker configuration with template ===";
pub const MERGE_DONE: &str = "=== Walker configuration merge complete ===";

/// `id|title|url|description [tags]|favicon`
pub fn format_pipe_line(bookmark: &Bookmark) -> String {
    let tags = match bookmark.tags.as_deref() {
        Some(tags) if !tags.is_empty() => format!(" [{}]", tags),
        _ => String::new(),
    };
    format!(
        "{}|{}|{}|{}{}|{}",
        bookmark.id,
        bookmark.title,
        bookmark.url,
        bookmark.description.as_deref().unwrap_or(""),
        tags,
        bookmark.favicon.as_deref().unwrap_or("")
    )
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Output(e.to_string()))
}

pub fn format_bookmarks(bookmarks: &[Bookmark], format: OutputFormat) -> Result<String, ApiError> {
    match format {
        OutputFormat::Pipe => Ok(bookmarks
            .iter()
            .map(format_pipe_line)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(bookmarks),
        OutputFormat::Table => {
            if bookmarks.is_empty() {
                return Ok("No bookmarks.".to_string());
            }
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["ID", "Title", "URL", "Tags"]);
            for b in bookmarks {
                table.add_row(vec![
                    b.id.to_string(),
                    b.title.clone(),
                    b.url.clone(),
                    b.tags.clone().unwrap_or_default(),
                ]);
            }
            Ok(table.to_string())
        }
    }
}

pub fn format_bookmark_detail(bookmark: &Bookmark, format: OutputFormat) -> Result<String, ApiError> {
    match format {
        OutputFormat::Pipe => Ok(format_pipe_line(bookmark)),
        OutputFormat::Json => to_json(bookmark),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Field", "Value"]);
            let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
            table.add_row(vec!["ID".to_string(), bookmark.id.to_string()]);
            table.add_row(vec!["Title".to_string(), bookmark.title.clone()]);
            table.add_row(vec!["URL".to_string(), bookmark.url.clone()]);
            table.add_row(vec!["Description".to_string(), optional(&bookmark.description)]);
            table.add_row(vec!["Tags".to_string(), optional(&bookmark.tags)]);
            table.add_row(vec!["Favicon".to_string(), optional(&bookmark.favicon)]);
            table.add_row(vec!["Created".to_string(), bookmark.created_at.clone()]);
            table.add_row(vec!["Updated".to_string(), bookmark.updated_at.clone()]);
            Ok(table.to_string())
        }
    }
}

/// Progress line for a merge milestone, None for events with no line of their own.
pub fn format_reconcile_event(event: &ReconcileEvent) -> Option<String> {
    match event {
        ReconcileEvent::Started { .. } => Some(format!("{}", MERGE_BANNER.bold())),
        ReconcileEvent::BackedUp { backup_path } => Some(format!(
            "  {} Backed up existing Walker config to: {}",
            "✓".green(),
            backup_path.display()
        )),
        ReconcileEvent::NoExistingConfig => Some(format!(
            "  {} No existing Walker config found, creating a new one.",
            "⚠".yellow()
        )),
        ReconcileEvent::Written { user_path } => Some(format!(
            "  {} Updated Walker config at: {}",
            "✓".green(),
            user_path.display()
        )),
        ReconcileEvent::DryRun => Some(format!(
            "  {} Dry run: Walker config left unchanged.",
            "⚠".yellow()
        )),
        ReconcileEvent::Completed => Some(format!("{}", MERGE_DONE.bold())),
    }
}
