//! Walker config merge workflow: read, merge, back up, write.
//!
//! All filesystem access for the reconciler lives here. Locations come in
//! through [`ReconcilePaths`] so tests can point the workflow at a temp dir.

use super::document;
use super::merge::reconcile;
use crate::error::ReconcileError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use toml::Table;
use tracing::{debug, info};

/// Locations of the user's Walker config and the bundled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePaths {
    pub user_path: PathBuf,
    pub template_path: PathBuf,
}

impl ReconcilePaths {
    pub fn new(user_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            user_path: user_path.into(),
            template_path: template_path.into(),
        }
    }

    /// `<user_path>.backup.<epoch_millis>`
    pub fn backup_path(&self, epoch_millis: i64) -> PathBuf {
        let mut name = OsString::from(self.user_path.as_os_str());
        name.push(format!(".backup.{}", epoch_millis));
        PathBuf::from(name)
    }
}

/// Milestones reported while the workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    Started { user_path: PathBuf },
    BackedUp { backup_path: PathBuf },
    NoExistingConfig,
    Written { user_path: PathBuf },
    DryRun,
    Completed,
}

/// Options for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Merge and return the result without backing up or writing.
    pub dry_run: bool,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub merged: Table,
    pub rendered: String,
    pub backup_path: Option<PathBuf>,
    pub written: bool,
}

/// Runs the merge against the configured paths.
pub struct WalkerConfigMerger {
    paths: ReconcilePaths,
    options: ReconcileOptions,
}

impl WalkerConfigMerger {
    pub fn new(paths: ReconcilePaths, options: ReconcileOptions) -> Self {
        Self { paths, options }
    }

    pub fn paths(&self) -> &ReconcilePaths {
        &self.paths
    }

    /// Run with the current wall clock as the backup timestamp.
    pub fn run<F>(&self, on_event: F) -> Result<ReconcileOutcome, ReconcileError>
    where
        F: FnMut(&ReconcileEvent),
    {
        self.run_at(chrono::Utc::now().timestamp_millis(), on_event)
    }

    /// Run with an explicit backup timestamp.
    ///
    /// A missing template aborts before anything is created, backed up or written.
    pub fn run_at<F>(&self, epoch_millis: i64, mut on_event: F) -> Result<ReconcileOutcome, ReconcileError>
    where
        F: FnMut(&ReconcileEvent),
    {
        let user_path = &self.paths.user_path;
        let template_path = &self.paths.template_path;

        info!(user = %user_path.display(), template = %template_path.display(), "Merging Walker config");
        on_event(&ReconcileEvent::Started {
            user_path: user_path.clone(),
        });

        if !template_path.exists() {
            return Err(ReconcileError::TemplateMissing(template_path.clone()));
        }

        if !self.options.dry_run {
            ensure_parent_dir(user_path)?;
        }

        let user = document::read_lenient(user_path);
        let template = document::read_lenient(template_path);
        debug!(
            user_keys = user.len(),
            template_keys = template.len(),
            "Loaded documents"
        );

        let merged = reconcile(&user, &template);
        let rendered = toml::to_string(&merged)?;

        if self.options.dry_run {
            on_event(&ReconcileEvent::DryRun);
            on_event(&ReconcileEvent::Completed);
            return Ok(ReconcileOutcome {
                merged,
                rendered,
                backup_path: None,
                written: false,
            });
        }

        let backup_path = self.backup_if_exists(epoch_millis)?;
        match &backup_path {
            Some(path) => on_event(&ReconcileEvent::BackedUp {
                backup_path: path.clone(),
            }),
            None => on_event(&ReconcileEvent::NoExistingConfig),
        }

        std::fs::write(user_path, &rendered).map_err(|source| ReconcileError::Write {
            path: user_path.clone(),
            source,
        })?;
        info!(user = %user_path.display(), "Walker config updated");
        on_event(&ReconcileEvent::Written {
            user_path: user_path.clone(),
        });
        on_event(&ReconcileEvent::Completed);

        Ok(ReconcileOutcome {
            merged,
            rendered,
            backup_path,
            written: true,
        })
    }

    fn backup_if_exists(&self, epoch_millis: i64) -> Result<Option<PathBuf>, ReconcileError> {
        let user_path = &self.paths.user_path;
        if !user_path.exists() {
            return Ok(None);
        }
        let backup_path = self.paths.backup_path(epoch_millis);
        std::fs::copy(user_path, &backup_path).map_err(|source| ReconcileError::Backup {
            path: user_path.clone(),
            source,
        })?;
        info!(backup = %backup_path.display(), "Backed up existing Walker config");
        Ok(Some(backup_path))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), ReconcileError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            std::fs::create_dir_all(dir).map_err(|source| ReconcileError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
