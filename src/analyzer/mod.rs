//! Workspace orchestrator
//!
//! Owns the per-language chunkers, the index, and the watcher. The
//! initial walk and every watcher burst funnel through the same
//! chunk-then-upsert path, so a file is only ever reindexed once per
//! quiescent burst.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use tokio_util::sync::CancellationToken;

use crate::chunker::{Chunker, Language, SourceFile};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, SourcererError};
use crate::fs::watcher::{BoxedChangeFuture, FileChangeHandler};
use crate::fs::{walk_source_files, WorkspaceWatcher};
use crate::index::Index;

#[derive(Debug, Default, Clone)]
struct Status {
    n_pending_files: usize,
    last_indexed_at: Option<SystemTime>,
}

/// Drives indexing for one workspace and answers queries against it
pub struct Analyzer {
    workspace_root: PathBuf,
    index: Arc<Index>,
    chunkers: Mutex<HashMap<Language, Arc<Chunker>>>,
    watcher: Mutex<Option<WorkspaceWatcher>>,
    status: RwLock<Status>,
    cancel: CancellationToken,
}

impl Analyzer {
    /// Create the analyzer, spawn the initial workspace walk, and
    /// start watching for changes.
    pub fn new(
        workspace_root: impl Into<PathBuf>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Arc<Self>> {
        let workspace_root = workspace_root.into();
        let cancel = CancellationToken::new();

        let analyzer = Arc::new(Self {
            index: Arc::new(Index::new(&workspace_root, embedder)),
            workspace_root: workspace_root.clone(),
            chunkers: Mutex::new(HashMap::new()),
            watcher: Mutex::new(None),
            status: RwLock::new(Status::default()),
            cancel: cancel.clone(),
        });

        {
            let analyzer = Arc::clone(&analyzer);
            tokio::spawn(async move {
                let cancel = analyzer.cancel.clone();
                analyzer.index_workspace(&cancel).await;
            });
        }

        // The watcher holds only a weak reference so dropping the
        // analyzer is enough to wind everything down.
        let weak = Arc::downgrade(&analyzer);
        let handler: FileChangeHandler = Arc::new(move |cancel, paths| {
            let weak = weak.clone();
            let fut: BoxedChangeFuture = Box::pin(async move {
                if let Some(analyzer) = weak.upgrade() {
                    analyzer.process_files(&cancel, paths).await;
                }
            });
            fut
        });

        let watcher =
            WorkspaceWatcher::new(&workspace_root, Language::supported_extensions(), handler)?;
        *analyzer
            .watcher
            .lock()
            .unwrap_or_else(|p| p.into_inner()) = Some(watcher);

        Ok(analyzer)
    }

    /// Walk the workspace and reindex everything stale, then drop
    /// records of files that vanished.
    pub async fn index_workspace(&self, cancel: &CancellationToken) {
        self.flush_pending_changes();

        let root = self.workspace_root.clone();
        let walk_cancel = cancel.clone();
        let walked = tokio::task::spawn_blocking(move || {
            let mut files = Vec::new();
            walk_source_files(&root, Language::supported_extensions(), &walk_cancel, |rel| {
                files.push(rel.to_string())
            })
            .map(|_| files)
        })
        .await;

        let files = match walked {
            Ok(Ok(files)) => files,
            Ok(Err(e)) => {
                tracing::warn!("Workspace walk failed: {e}");
                return;
            }
            Err(e) => {
                tracing::warn!("Workspace walk task failed: {e}");
                return;
            }
        };

        let mut to_process = Vec::new();
        for file_path in files {
            if cancel.is_cancelled() {
                return;
            }
            if self.index.is_stale(&file_path).await {
                to_process.push(file_path);
            }
        }

        self.process_files(cancel, to_process).await;

        if let Err(e) = self.index.cleanup_deleted_files().await {
            tracing::warn!("Orphan cleanup failed: {e}");
        }
    }

    /// Reindex a burst of changed files, tracking progress for the
    /// status tool. Errors are logged per file; the burst continues.
    pub async fn process_files(&self, cancel: &CancellationToken, file_paths: Vec<String>) {
        if file_paths.is_empty() {
            return;
        }

        {
            let mut status = self.status.write().unwrap_or_else(|p| p.into_inner());
            status.n_pending_files = file_paths.len();
        }

        for file_path in file_paths {
            if cancel.is_cancelled() {
                break;
            }

            if let Err(e) = self.chunk_and_index(&file_path).await {
                tracing::warn!("Failed to index {file_path}: {e}");
            }

            let mut status = self.status.write().unwrap_or_else(|p| p.into_inner());
            status.n_pending_files = status.n_pending_files.saturating_sub(1);
        }

        let mut status = self.status.write().unwrap_or_else(|p| p.into_inner());
        status.n_pending_files = 0;
        status.last_indexed_at = Some(SystemTime::now());
    }

    /// Parse one file and upsert its chunks
    async fn chunk_and_index(&self, file_path: &str) -> Result<()> {
        let chunker = self.chunker_for(file_path)?;

        let parse_path = file_path.to_string();
        let file: SourceFile = tokio::task::spawn_blocking(move || chunker.chunk(&parse_path))
            .await
            .map_err(|e| SourcererError::Other(format!("parse task failed: {e}")))??;

        self.index.upsert(&file).await
    }

    fn chunker_for(&self, file_path: &str) -> Result<Arc<Chunker>> {
        let language = Language::detect_path(file_path)
            .ok_or_else(|| SourcererError::UnsupportedFile(file_path.to_string()))?;

        let mut chunkers = self.chunkers.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(chunker) = chunkers.get(&language) {
            return Ok(Arc::clone(chunker));
        }

        let chunker = Arc::new(Chunker::new(&self.workspace_root, language)?);
        chunkers.insert(language, Arc::clone(&chunker));
        Ok(chunker)
    }

    /// Semantic search over the index; pending watcher changes are
    /// flushed first so results reflect the latest edits.
    pub async fn semantic_search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        self.flush_pending_changes();
        self.index.search(query, None, cancel).await
    }

    /// Resolve chunk ids to framed source envelopes. Per-id failures
    /// are inlined as diagnostics; this never fails wholesale.
    pub async fn get_chunk_sources(&self, ids: &[String], cancel: &CancellationToken) -> String {
        let mut out = String::new();
        for id in ids {
            if cancel.is_cancelled() {
                break;
            }
            out.push_str(&self.chunk_source(id).await);
        }
        out
    }

    async fn chunk_source(&self, id: &str) -> String {
        let Some((file_path, _)) = id.split_once("::") else {
            return format!("== {id} ==\n\n<invalid chunk id>\n\n");
        };

        if self.index.is_stale(file_path).await {
            if let Err(e) = self.chunk_and_index(file_path).await {
                return format!("== {id} ==\n\n<processing error: {e}>\n\n");
            }
        }

        match self.index.get_chunk(id).await {
            Ok(chunk) => format!("== {id} ==\n\n{}\n\n", chunk.source),
            Err(_) => format!("== {id} ==\n\n<source not found for chunk>\n\n"),
        }
    }

    /// Pending-file count (including buffered watcher changes) and the
    /// time of the last completed indexing pass.
    pub fn get_index_status(&self) -> (usize, Option<SystemTime>) {
        let status = self.status.read().unwrap_or_else(|p| p.into_inner());
        let mut pending = status.n_pending_files;

        let watcher = self.watcher.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(watcher) = &*watcher {
            pending += watcher.pending_count();
        }

        (pending, status.last_indexed_at)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn flush_pending_changes(&self) {
        let watcher = self.watcher.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(watcher) = &*watcher {
            watcher.flush_pending();
        }
    }

    /// Stop the watcher and cancel in-flight work
    pub fn close(&self) {
        let watcher = self.watcher.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(watcher) = &*watcher {
            watcher.close();
        }
        self.cancel.cancel();
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
