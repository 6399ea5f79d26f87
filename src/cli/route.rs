//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Commands, MergeCli};
use crate::cli::presentation::{format_bookmark_detail, format_bookmarks, format_reconcile_event};
use crate::config::{BookmarksConfig, ConfigLoader};
use crate::desktop::ShellDesktop;
use crate::error::{ApiError, StorageError};
use crate::favicon::{FaviconFetcher, FaviconSource};
use crate::interactive::{self, AddOutcome, DeleteOutcome};
use crate::store::{non_blank, BookmarkStore, BookmarkUpdate, NewBookmark, SqliteBookmarkStore};
use crate::walker::{ReconcileOptions, ReconcileOutcome, ReconcilePaths, WalkerConfigMerger};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for the bookmarks CLI: loaded config and the opened store.
pub struct RunContext {
    config: BookmarksConfig,
    database_path: PathBuf,
    store: SqliteBookmarkStore,
}

impl RunContext {
    /// Load config (optionally from `config_path`), apply a database override and open the store.
    pub fn new(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load_optional(config_path)?;
        if let Some(database) = database {
            config.storage.database_path = Some(database);
        }
        Self::with_config(config)
    }

    pub fn with_config(config: BookmarksConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|errors| ApiError::ConfigError(errors.join("; ")))?;
        let database_path = config.storage.resolve_database_path()?;
        let store = SqliteBookmarkStore::open(&database_path)?;
        debug!(path = %database_path.display(), "Opened bookmark store");
        Ok(Self {
            config,
            database_path,
            store,
        })
    }

    pub fn store(&self) -> &SqliteBookmarkStore {
        &self.store
    }

    fn favicon_fetcher(&self) -> Result<FaviconFetcher, ApiError> {
        FaviconFetcher::new(&self.config.favicon, self.config.storage.resolve_favicon_dir()?)
    }

    /// Run one command and return what should be printed on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init => {
                let favicon_dir = self.config.storage.resolve_favicon_dir()?;
                std::fs::create_dir_all(&favicon_dir).map_err(StorageError::IoError)?;
                Ok(format!(
                    "Database initialized at {}\nTotal bookmarks: {}",
                    self.database_path.display(),
                    self.store.count()?
                ))
            }
            Commands::List { format } => format_bookmarks(&self.store.list_all()?, *format),
            Commands::Search { query, format } => {
                format_bookmarks(&self.store.search(query)?, *format)
            }
            Commands::Add {
                url,
                title,
                description,
                tags,
                favicon,
                fetch_favicon,
            } => {
                let mut favicon = non_blank(favicon.clone());
                if favicon.is_none() && *fetch_favicon {
                    favicon = self
                        .favicon_fetcher()?
                        .fetch_favicon(url)
                        .map(|p| p.to_string_lossy().into_owned());
                }
                let title = non_blank(title.clone()).unwrap_or_else(|| url.clone());
                let new = NewBookmark::new(title, url.clone())
                    .with_description(description.clone())
                    .with_tags(tags.clone())
                    .with_favicon(favicon);
                let bookmark = self.store.create(&new)?;
                info!(id = bookmark.id, url = %bookmark.url, "Bookmark added");
                Ok(format!("Added: {}", bookmark.title))
            }
            Commands::Show { id, format } => match self.store.find_by_id(*id)? {
                Some(bookmark) => format_bookmark_detail(&bookmark, *format),
                None => Err(StorageError::NotFound(*id).into()),
            },
            Commands::Update {
                id,
                title,
                url,
                description,
                tags,
                favicon,
            } => {
                let update = BookmarkUpdate {
                    title: title.clone(),
                    url: url.clone(),
                    description: description.clone(),
                    tags: tags.clone(),
                    favicon: favicon.clone(),
                };
                if update.is_empty() {
                    return Err(StorageError::Validation("nothing to update".to_string()).into());
                }
                match self.store.update(*id, &update)? {
                    Some(bookmark) => Ok(format!("Updated: {}", bookmark.title)),
                    None => Err(StorageError::NotFound(*id).into()),
                }
            }
            Commands::Delete { id } => Ok(if self.store.delete(*id)? {
                "Deleted".to_string()
            } else {
                "Not found".to_string()
            }),
            Commands::AddInteractive => {
                let desktop = ShellDesktop::new(self.config.desktop.clone());
                let favicons = self.favicon_fetcher()?;
                match interactive::add_bookmark(&self.store, &desktop, &favicons)? {
                    AddOutcome::Added(bookmark) => Ok(format!("Added: {}", bookmark.title)),
                    AddOutcome::Cancelled => Ok("Cancelled".to_string()),
                }
            }
            Commands::DeleteInteractive => {
                let desktop = ShellDesktop::new(self.config.desktop.clone());
                match interactive::delete_bookmark(&self.store, &desktop)? {
                    DeleteOutcome::Deleted { title, .. } => Ok(format!("Deleted: {}", title)),
                    DeleteOutcome::NothingToDelete => Ok("No bookmarks to delete".to_string()),
                    DeleteOutcome::Cancelled => Ok("Cancelled".to_string()),
                }
            }
        }
    }
}

/// Resolve merge paths: flags first, then the `walker` config section, then defaults.
pub fn merge_paths(args: &MergeCli, config: &BookmarksConfig) -> Result<ReconcilePaths, ApiError> {
    let user_path = match &args.user_config {
        Some(path) => path.clone(),
        None => config.walker.resolve_user_config_path()?,
    };
    let template_path = args
        .template
        .clone()
        .unwrap_or_else(|| config.walker.resolve_template_path());
    Ok(ReconcilePaths::new(user_path, template_path))
}

/// Run the Walker config merge, handing each progress line to `emit`.
pub fn run_merge<F>(
    args: &MergeCli,
    config: &BookmarksConfig,
    mut emit: F,
) -> Result<ReconcileOutcome, ApiError>
where
    F: FnMut(String),
{
    let paths = merge_paths(args, config)?;
    let merger = WalkerConfigMerger::new(
        paths,
        ReconcileOptions {
            dry_run: args.dry_run,
        },
    );
    let outcome = merger.run(|event| {
        if let Some(line) = format_reconcile_event(event) {
            emit(line);
        }
    })?;
    Ok(outcome)
}
