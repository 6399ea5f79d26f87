//! Interactive add/delete flows driven through the launcher menu.

use crate::desktop::Desktop;
use crate::error::{ApiError, StorageError};
use crate::favicon::FaviconSource;
use crate::store::{Bookmark, BookmarkStore, NewBookmark};
use reqwest::Url;
use tracing::{info, warn};

const URL_PROMPT: &str = "🔗 Enter URL:";
const TITLE_PROMPT: &str = "📝 Enter Title:";
const DESCRIPTION_PROMPT: &str = "💬 Description (optional):";
const DESCRIPTION_HINT: &str = "💬 Description (optional - press Esc to skip)";
const TAGS_PROMPT: &str = "🏷️  Tags:";
const TAGS_HINT: &str = "🏷️  Tags (optional - space separated, press Esc to skip)";

/// Result of the interactive add flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Bookmark),
    Cancelled,
}

/// Result of the interactive delete flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { id: i64, title: String },
    NothingToDelete,
    Cancelled,
}

fn is_http_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Title suggested for a URL: its host without a leading `www.`.
pub fn default_title(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Optional answers that still contain the hint text were not really answered.
fn optional_answer(answer: Option<String>) -> Option<String> {
    answer.filter(|a| !a.contains("optional") && !a.trim().is_empty())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Add a bookmark through a sequence of menu prompts.
///
/// The clipboard seeds the URL when it holds an http(s) URL. Dismissing the
/// URL or title prompt cancels. Description and tags are optional.
pub fn add_bookmark<S, D, F>(store: &S, desktop: &D, favicons: &F) -> Result<AddOutcome, ApiError>
where
    S: BookmarkStore + ?Sized,
    D: Desktop + ?Sized,
    F: FaviconSource + ?Sized,
{
    let clipboard_url = desktop.clipboard().filter(|text| is_http_url(text));

    desktop.notify("Add Bookmark - Step 1/4", "Enter the URL", None);
    let url_options: Vec<String> = clipboard_url.into_iter().collect();
    let url = match desktop.prompt(URL_PROMPT, &url_options) {
        Some(url) if !url.contains("Enter URL") => url,
        _ => {
            desktop.notify("Cancelled", "Bookmark creation cancelled", None);
            return Ok(AddOutcome::Cancelled);
        }
    };

    if !is_http_url(&url) {
        desktop.notify("Invalid URL", "URL must start with http:// or https://", None);
        return Err(ApiError::InvalidUrl(url));
    }
    let Some(suggested_title) = default_title(&url) else {
        desktop.notify("Invalid URL", "URL must start with http:// or https://", None);
        return Err(ApiError::InvalidUrl(url));
    };

    desktop.notify(
        "Add Bookmark - Step 2/4",
        &format!("Enter a title for: {}...", truncate_chars(&url, 40)),
        None,
    );
    let title = match desktop.prompt(TITLE_PROMPT, &[suggested_title]) {
        Some(title) if !title.contains("Enter Title") => title,
        _ => {
            desktop.notify("Cancelled", "Bookmark creation cancelled", None);
            return Ok(AddOutcome::Cancelled);
        }
    };

    desktop.notify("Add Bookmark - Step 3/4", "Enter description (or leave empty)", None);
    let description = optional_answer(
        desktop.prompt(DESCRIPTION_PROMPT, &[DESCRIPTION_HINT.to_string(), String::new()]),
    );

    desktop.notify("Add Bookmark - Step 4/4", "Enter tags (or leave empty)", None);
    let tags = optional_answer(desktop.prompt(TAGS_PROMPT, &[TAGS_HINT.to_string(), String::new()]));

    desktop.notify("Processing...", "Downloading favicon and saving bookmark", None);
    let favicon = favicons
        .fetch_favicon(&url)
        .map(|path| path.to_string_lossy().into_owned());

    let new_bookmark = NewBookmark::new(title, url)
        .with_description(description)
        .with_tags(tags)
        .with_favicon(favicon);

    match store.create(&new_bookmark) {
        Ok(bookmark) => {
            desktop.notify(
                "✅ Bookmark Added!",
                &bookmark.title,
                Some(bookmark.favicon.as_deref().unwrap_or("bookmark")),
            );
            info!(id = bookmark.id, url = %bookmark.url, "Bookmark added interactively");
            Ok(AddOutcome::Added(bookmark))
        }
        Err(StorageError::DuplicateUrl(url)) => {
            desktop.notify("Error", "Bookmark already exists", None);
            Err(StorageError::DuplicateUrl(url).into())
        }
        Err(e) => {
            desktop.notify("Error", &format!("Failed to add bookmark: {}", e), None);
            Err(e.into())
        }
    }
}

/// Pick a bookmark from the menu and delete it after confirmation.
pub fn delete_bookmark<S, D>(store: &S, desktop: &D) -> Result<DeleteOutcome, ApiError>
where
    S: BookmarkStore + ?Sized,
    D: Desktop + ?Sized,
{
    let bookmarks = store.list_all()?;
    if bookmarks.is_empty() {
        desktop.notify("No Bookmarks", "No bookmarks to delete", None);
        return Ok(DeleteOutcome::NothingToDelete);
    }

    let lines: Vec<String> = bookmarks
        .iter()
        .map(|b| format!("{}|{}|{}", b.id, b.title, b.url))
        .collect();
    let Some(selection) = desktop.choose(&lines) else {
        return Ok(DeleteOutcome::Cancelled);
    };

    let mut fields = selection.splitn(3, '|');
    let id = fields.next().and_then(|id| id.trim().parse::<i64>().ok());
    let title = fields.next().unwrap_or_default().to_string();
    let Some(id) = id else {
        warn!(selection = %selection, "Menu selection is not a bookmark line");
        return Ok(DeleteOutcome::Cancelled);
    };

    let confirm_lines = vec![format!("Yes, delete '{}'", title), "No, cancel".to_string()];
    let confirmed = desktop
        .choose(&confirm_lines)
        .is_some_and(|answer| answer.starts_with("Yes"));
    if !confirmed {
        desktop.notify("Cancelled", "Bookmark not deleted", None);
        return Ok(DeleteOutcome::Cancelled);
    }

    store.delete(id)?;
    desktop.notify("🗑️  Bookmark Deleted", &title, None);
    info!(id, "Bookmark deleted interactively");
    Ok(DeleteOutcome::Deleted { id, title })
}
