//! File system watcher for development mode.
//!
//! Watches the project directory recursively and forwards relevant changes.
//! Delivery never blocks the notify thread: when the queue is full the change
//! is dropped, since a rebuild is already pending and will see it.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{self, error::TrySendError};

const CHANGE_QUEUE: usize = 64;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_kind(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Decides which paths under the watch root are irrelevant.
#[derive(Debug, Clone, Default)]
pub struct WatchFilter {
    patterns: Vec<String>,
    dirs: Vec<PathBuf>,
}

impl WatchFilter {
    /// `patterns` are directory names (`node_modules`), relative paths
    /// (`public/vendor`) or extension globs (`*.log`).
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            dirs: Vec::new(),
        }
    }

    /// Also ignore everything under `dir` (e.g. an absolute output directory).
    pub fn ignore_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        if self.dirs.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }

        // Only paths inside the root are watched.
        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };

        let hidden = rel_path.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
        });
        if hidden {
            return true;
        }

        let path_str = rel_path.to_string_lossy();
        self.patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => path_str.ends_with(suffix),
            None => {
                rel_path.starts_with(pattern)
                    || rel_path
                        .components()
                        .any(|component| component.as_os_str() == pattern.as_str())
            }
        })
    }
}

/// Recursive watcher feeding a bounded change queue.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// Every relevant event is forwarded. Bursts are settled by the consumer
    /// (see [`RebuildLoop::with_debounce`](crate::dev::RebuildLoop::with_debounce)).
    pub fn new(root: PathBuf, filter: WatchFilter) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }
        let root = root.canonicalize()?;

        let (tx, rx) = mpsc::channel(CHANGE_QUEUE);
        let watch_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "watch error");
                    return;
                }
            };

            for path in event.paths {
                if filter.is_ignored(&path, &watch_root) {
                    continue;
                }

                let Some(change) = FileChange::from_kind(&event.kind, path) else {
                    continue;
                };
                match tx.try_send(change) {
                    Ok(()) => {}
                    Err(TrySendError::Full(change)) => {
                        tracing::trace!(
                            path = %change.path().display(),
                            "change queue full, coalesced"
                        );
                    }
                    Err(TrySendError::Closed(_)) => return,
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
