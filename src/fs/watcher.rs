//! Debounced workspace watcher
//!
//! Subscribes to native filesystem notifications for every directory
//! that contains a supported file, buffers changed paths into a set,
//! and invokes the handler once per quiescent burst: each accepted
//! event re-arms a single 60-second timer, and the set is drained when
//! it fires (or when a caller forces a flush).

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SourcererError};
use crate::fs::{relative_path, walk_source_files, FileFilter};

const DEBOUNCE: Duration = Duration::from_secs(60);

pub type BoxedChangeFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Called with the watcher's cancellation token and one drained burst
/// of workspace-relative paths. Each path appears at most once.
pub type FileChangeHandler =
    Arc<dyn Fn(CancellationToken, Vec<String>) -> BoxedChangeFuture + Send + Sync>;

/// Watches a workspace and drives incremental reindexing
pub struct WorkspaceWatcher {
    pending: Arc<Mutex<HashSet<String>>>,
    flush_tx: mpsc::UnboundedSender<()>,
    cancel: CancellationToken,
    // Kept alive for the lifetime of the watcher; registration happens
    // on a blocking task
    _watcher: Arc<Mutex<RecommendedWatcher>>,
}

impl WorkspaceWatcher {
    /// Open a native notification handle, register every directory
    /// containing a supported file, and spawn the event loop.
    pub fn new(
        workspace_root: impl Into<PathBuf>,
        supported_exts: &[&str],
        handler: FileChangeHandler,
    ) -> Result<Self> {
        let workspace_root = workspace_root.into();
        let cancel = CancellationToken::new();
        let pending = Arc::new(Mutex::new(HashSet::new()));
        let filter = Arc::new(FileFilter::new(&workspace_root, supported_exts));

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let watcher = notify::recommended_watcher(move |result| {
            let _ = event_tx.send(result);
        })
        .map_err(|e| SourcererError::Other(format!("failed to create file watcher: {e}")))?;
        let watcher = Arc::new(Mutex::new(watcher));

        Self::register_directories(
            Arc::clone(&watcher),
            workspace_root.clone(),
            supported_exts.iter().map(|e| e.to_string()).collect(),
            cancel.clone(),
        );

        let (flush_tx, flush_rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::event_loop(
            workspace_root,
            filter,
            Arc::clone(&pending),
            handler,
            event_rx,
            flush_rx,
            cancel.clone(),
        ));

        Ok(Self {
            pending,
            flush_tx,
            cancel,
            _watcher: watcher,
        })
    }

    /// Walk the workspace once on a blocking task and watch the parent
    /// directory of every supported file.
    fn register_directories(
        watcher: Arc<Mutex<RecommendedWatcher>>,
        workspace_root: PathBuf,
        supported_exts: Vec<String>,
        cancel: CancellationToken,
    ) {
        tokio::task::spawn_blocking(move || {
            let exts: Vec<&str> = supported_exts.iter().map(String::as_str).collect();
            let mut dirs = HashSet::new();

            let walk = walk_source_files(&workspace_root, &exts, &cancel, |rel| {
                if let Some(dir) = workspace_root.join(rel).parent() {
                    dirs.insert(dir.to_path_buf());
                }
            });
            if let Err(e) = walk {
                tracing::warn!("Workspace walk for watch registration failed: {e}");
                return;
            }

            let mut watcher = watcher.lock().unwrap_or_else(|p| p.into_inner());
            for dir in &dirs {
                if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
                    tracing::warn!("Failed to watch {}: {e}", dir.display());
                }
            }
            tracing::debug!("Watching {} directories", dirs.len());
        });
    }

    async fn event_loop(
        workspace_root: PathBuf,
        filter: Arc<FileFilter>,
        pending: Arc<Mutex<HashSet<String>>>,
        handler: FileChangeHandler,
        mut event_rx: mpsc::UnboundedReceiver<notify::Result<notify::Event>>,
        mut flush_rx: mpsc::UnboundedReceiver<()>,
        cancel: CancellationToken,
    ) {
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,

                event = event_rx.recv() => {
                    let Some(event) = event else { break };
                    match event {
                        Ok(event) => {
                            if !accepts(&event.kind) {
                                continue;
                            }
                            let mut accepted = false;
                            for path in &event.paths {
                                if filter.should_ignore(path) {
                                    continue;
                                }
                                let rel = relative_path(&workspace_root, path);
                                pending.lock().unwrap_or_else(|p| p.into_inner()).insert(rel);
                                accepted = true;
                            }
                            // Any accepted event re-arms the single timer
                            if accepted {
                                deadline = Some(Instant::now() + DEBOUNCE);
                            }
                        }
                        Err(e) => tracing::warn!("File watcher error: {e}"),
                    }
                }

                flush = flush_rx.recv() => {
                    if flush.is_none() {
                        break;
                    }
                    Self::dispatch(&pending, &handler, &cancel).await;
                    deadline = None;
                }

                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                        if deadline.is_some() => {
                    Self::dispatch(&pending, &handler, &cancel).await;
                    deadline = None;
                }
            }
        }
    }

    /// Drain the pending set and hand the burst to the handler. Awaiting
    /// here serializes dispatch: at most one handler runs at a time.
    async fn dispatch(
        pending: &Arc<Mutex<HashSet<String>>>,
        handler: &FileChangeHandler,
        cancel: &CancellationToken,
    ) {
        let changes: Vec<String> = {
            let mut set = pending.lock().unwrap_or_else(|p| p.into_inner());
            set.drain().collect()
        };
        if changes.is_empty() {
            return;
        }

        tracing::debug!("Dispatching {} changed files", changes.len());
        handler(cancel.clone(), changes).await;
    }

    /// Force the current debounce timer to fire immediately
    pub fn flush_pending(&self) {
        let _ = self.flush_tx.send(());
    }

    /// Number of distinct paths currently buffered
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    /// Cancel the event loop and release the notification handle
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for WorkspaceWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn accepts(kind: &EventKind) -> bool {
    // create | write | remove | rename; access and metadata-only
    // events are dropped
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
