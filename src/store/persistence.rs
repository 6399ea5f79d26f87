//! Persistence layer for the Bookmark Store

use crate::error::StorageError;
use crate::store::{Bookmark, BookmarkStore, BookmarkUpdate, NewBookmark};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS bookmarks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    description TEXT,
    tags TEXT,
    favicon TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_title ON bookmarks(title);
CREATE INDEX IF NOT EXISTS idx_bookmarks_tags ON bookmarks(tags);
CREATE INDEX IF NOT EXISTS idx_bookmarks_created ON bookmarks(created_at);
";

const SELECT_COLUMNS: &str =
    "SELECT id, title, url, description, tags, favicon, created_at, updated_at FROM bookmarks";

// CURRENT_TIMESTAMP has one-second resolution; id breaks ties.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// SQLite-based implementation of BookmarkStore
pub struct SqliteBookmarkStore {
    conn: Connection,
}

impl SqliteBookmarkStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "Opened bookmark database");

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the table and indexes if they are missing.
    pub fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn query_list(&self, sql: &str, pattern: Option<&str>) -> Result<Vec<Bookmark>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match pattern {
            Some(pattern) => stmt.query_map(params![pattern], scan_bookmark)?,
            None => stmt.query_map([], scan_bookmark)?,
        };
        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(row?);
        }
        Ok(bookmarks)
    }
}

impl BookmarkStore for SqliteBookmarkStore {
    fn create(&self, bookmark: &NewBookmark) -> Result<Bookmark, StorageError> {
        bookmark.validate()?;

        self.conn
            .execute(
                "INSERT INTO bookmarks (title, url, description, tags, favicon)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    bookmark.title,
                    bookmark.url,
                    bookmark.description,
                    bookmark.tags,
                    bookmark.favicon,
                ],
            )
            .map_err(|e| map_constraint_error(e, &bookmark.url))?;

        let id = self.conn.last_insert_rowid();
        debug!(id, url = %bookmark.url, "Bookmark created");
        self.find_by_id(id)?.ok_or(StorageError::NotFound(id))
    }

    fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        self.query_list(&format!("{} {}", SELECT_COLUMNS, NEWEST_FIRST), None)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError> {
        let bookmark = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                scan_bookmark,
            )
            .optional()?;
        Ok(bookmark)
    }

    fn search(&self, query: &str) -> Result<Vec<Bookmark>, StorageError> {
        let sql = format!(
            "{} WHERE title LIKE ?1 ESCAPE '\\'
                OR url LIKE ?1 ESCAPE '\\'
                OR description LIKE ?1 ESCAPE '\\'
                OR tags LIKE ?1 ESCAPE '\\'
             {}",
            SELECT_COLUMNS, NEWEST_FIRST
        );
        self.query_list(&sql, Some(&like_pattern(query)))
    }

    fn update(&self, id: i64, update: &BookmarkUpdate) -> Result<Option<Bookmark>, StorageError> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(StorageError::Validation("title cannot be empty".into()));
        }
        if update.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(StorageError::Validation("url cannot be empty".into()));
        }
        if update.is_empty() {
            return self.find_by_id(id);
        }

        // NULL parameters keep the column; blank optional text clears it.
        let changed = self
            .conn
            .execute(
                "UPDATE bookmarks SET
                    title = COALESCE(?1, title),
                    url = COALESCE(?2, url),
                    description = CASE WHEN ?3 IS NULL THEN description
                                       WHEN TRIM(?3) = '' THEN NULL ELSE ?3 END,
                    tags = CASE WHEN ?4 IS NULL THEN tags
                                WHEN TRIM(?4) = '' THEN NULL ELSE ?4 END,
                    favicon = CASE WHEN ?5 IS NULL THEN favicon
                                   WHEN TRIM(?5) = '' THEN NULL ELSE ?5 END,
                    updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?6",
                params![
                    update.title,
                    update.url,
                    update.description,
                    update.tags,
                    update.favicon,
                    id,
                ],
            )
            .map_err(|e| map_constraint_error(e, update.url.as_deref().unwrap_or_default()))?;

        if changed == 0 {
            return Ok(None);
        }
        debug!(id, "Bookmark updated");
        self.find_by_id(id)
    }

    fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn scan_bookmark(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        description: row.get(3)?,
        tags: row.get(4)?,
        favicon: row.get(5)?,
        created_at: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        updated_at: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}

fn map_constraint_error(err: rusqlite::Error, url: &str) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StorageError::DuplicateUrl(url.to_string())
        }
        _ => StorageError::Sqlite(err),
    }
}

/// `%query%` with LIKE wildcards in the query taken literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
