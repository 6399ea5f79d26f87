//! Bookmark Store
//!
//! One-table store of bookmarks: URL, title, optional description, tags and
//! favicon path, plus creation/update timestamps.

pub mod persistence;

pub use persistence::SqliteBookmarkStore;

use crate::error::StorageError;
use serde::{Deserialize, Serialize};

/// A stored bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub favicon: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for a bookmark that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub favicon: Option<String>,
}

impl NewBookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn with_tags(mut self, tags: Option<String>) -> Self {
        self.tags = non_blank(tags);
        self
    }

    pub fn with_favicon(mut self, favicon: Option<String>) -> Self {
        self.favicon = non_blank(favicon);
        self
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        if self.title.trim().is_empty() {
            return Err(StorageError::Validation("title is required".into()));
        }
        if self.url.trim().is_empty() {
            return Err(StorageError::Validation("url is required".into()));
        }
        Ok(())
    }
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub favicon: Option<String>,
}

impl BookmarkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.favicon.is_none()
    }
}

/// Empty or whitespace-only optional text is stored as NULL.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Bookmark Store interface
pub trait BookmarkStore {
    /// Insert a bookmark. Fails with `DuplicateUrl` if the URL is already stored.
    fn create(&self, bookmark: &NewBookmark) -> Result<Bookmark, StorageError>;

    /// All bookmarks, newest first.
    fn list_all(&self) -> Result<Vec<Bookmark>, StorageError>;

    fn find_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError>;

    /// Substring match across title, url, description and tags, newest first.
    fn search(&self, query: &str) -> Result<Vec<Bookmark>, StorageError>;

    /// Apply a partial update. Returns None if no bookmark has `id`.
    fn update(&self, id: i64, update: &BookmarkUpdate) -> Result<Option<Bookmark>, StorageError>;

    /// Returns whether a row was deleted.
    fn delete(&self, id: i64) -> Result<bool, StorageError>;

    fn count(&self) -> Result<usize, StorageError>;
}
