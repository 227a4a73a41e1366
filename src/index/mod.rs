//! Freshness-aware adapter between parsed files and the vector store
//!
//! Owns the in-memory freshness cache (`file path -> max parsed_at`)
//! and enforces the retrieval contract: results below the similarity
//! floor, outside the type filter, or pointing at stale files never
//! reach the caller. Stale hits are reaped asynchronously.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::UNIX_EPOCH;

use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::chunker::{Chunk, FileType, SourceFile};
use crate::config;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, SourcererError, StoreError};
use crate::store::{Collection, Document, NewDocument, QueryResult};

const MIN_SIMILARITY: f32 = 0.3;
const MAX_RESULTS: usize = 30;

const SIMILAR_MIN_SIMILARITY: f32 = 0.6;
const MAX_SIMILAR_RESULTS: usize = 10;

/// Chunker <-> vector store adapter with a freshness cache
pub struct Index {
    workspace_root: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    // One-shot open; failure is memoized and returned to every caller
    store: OnceCell<std::result::Result<Arc<Collection>, String>>,
    // Reader-preferring: is_stale sits on the hot path of search and walking
    freshness: RwLock<HashMap<String, i64>>,
}

impl Index {
    pub fn new(workspace_root: impl AsRef<Path>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            embedder,
            store: OnceCell::new(),
            freshness: RwLock::new(HashMap::new()),
        }
    }

    /// Open the collection on first use; subsequent calls short-circuit
    /// to the memoized result.
    async fn collection(&self) -> std::result::Result<Arc<Collection>, StoreError> {
        let result = self
            .store
            .get_or_init(|| async {
                let db_dir = self.workspace_root.join(config::DB_DIR);
                match Collection::open(&db_dir, Arc::clone(&self.embedder)) {
                    Ok(collection) => {
                        let collection = Arc::new(collection);
                        self.prime_freshness(&collection).await;
                        Ok(collection)
                    }
                    Err(e) => {
                        tracing::error!("Failed to open vector store: {e}");
                        Err(e.to_string())
                    }
                }
            })
            .await;

        result.clone().map_err(StoreError::OpenFailed)
    }

    /// Scan all records once, keeping the max parsedAt per file
    async fn prime_freshness(&self, collection: &Collection) {
        let mut cache: HashMap<String, i64> = HashMap::new();
        for id in collection.list_ids().await {
            let Some(doc) = collection.get(&id).await else {
                continue;
            };
            let Some(file) = doc.metadata.get("file") else {
                continue;
            };
            let parsed_at = metadata_i64(&doc, "parsedAt");
            let entry = cache.entry(file.clone()).or_insert(parsed_at);
            *entry = (*entry).max(parsed_at);
        }

        tracing::debug!("Rehydrated freshness cache for {} files", cache.len());
        let mut freshness = self.freshness.write().unwrap_or_else(|p| p.into_inner());
        *freshness = cache;
    }

    /// Replace every record of `file` with its current chunks.
    ///
    /// The cache entry is written only after the store acknowledges the
    /// replacement, so a failed upsert leaves the file stale.
    pub async fn upsert(&self, file: &SourceFile) -> Result<()> {
        let collection = self.collection().await?;

        let docs: Vec<NewDocument> = file.chunks.iter().map(to_new_document).collect();
        collection.replace_file(&file.path, docs).await?;

        let mut freshness = self.freshness.write().unwrap_or_else(|p| p.into_inner());
        freshness.insert(file.path.clone(), file.parsed_at);
        Ok(())
    }

    /// Delete all records of `file_path` and drop its cache entry
    pub async fn remove(&self, file_path: &str) -> Result<()> {
        let collection = self.collection().await?;
        collection.delete_where("file", file_path).await?;

        let mut freshness = self.freshness.write().unwrap_or_else(|p| p.into_inner());
        freshness.remove(file_path);
        Ok(())
    }

    /// A file is stale when it has no cache entry, has vanished, or its
    /// on-disk mtime exceeds the cached parse time.
    pub async fn is_stale(&self, file_path: &str) -> bool {
        if self.collection().await.is_err() {
            return true;
        }

        self.file_is_stale(file_path)
    }

    fn file_is_stale(&self, file_path: &str) -> bool {
        let cached = {
            let freshness = self.freshness.read().unwrap_or_else(|p| p.into_inner());
            freshness.get(file_path).copied()
        };
        let Some(cached) = cached else {
            return true;
        };

        match mtime_secs(&self.workspace_root.join(file_path)) {
            Some(mtime) => mtime > cached,
            None => true,
        }
    }

    /// Rehydrate a chunk from its stored record
    pub async fn get_chunk(&self, id: &str) -> Result<Chunk> {
        let collection = self.collection().await?;
        let doc = collection
            .get(id)
            .await
            .ok_or_else(|| SourcererError::NotFound(id.to_string()))?;

        Ok(rehydrate(&doc))
    }

    /// Typed semantic search returning decorated ids
    pub async fn search(
        &self,
        query: &str,
        types: Option<&[FileType]>,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let types: Vec<FileType> = match types {
            Some(types) if !types.is_empty() => types.to_vec(),
            _ => vec![FileType::Src, FileType::Docs],
        };

        let collection = self.collection().await?;
        let n_candidates = (2 * MAX_RESULTS * types.len()).min(collection.count().await);
        if n_candidates == 0 {
            return Ok(vec![]);
        }

        let results = collection.query(query, n_candidates).await?;
        self.collect_results(
            &collection,
            results,
            MIN_SIMILARITY,
            MAX_RESULTS,
            &types,
            None,
            cancel,
        )
        .await
    }

    /// Chunks similar to the one identified by `id`, using its stored
    /// embedding; the query chunk itself is excluded.
    pub async fn find_similar(&self, id: &str, cancel: &CancellationToken) -> Result<Vec<String>> {
        let collection = self.collection().await?;
        let doc = collection
            .get(id)
            .await
            .ok_or_else(|| SourcererError::NotFound(id.to_string()))?;

        let n_candidates = (2 * MAX_SIMILAR_RESULTS + 1).min(collection.count().await);
        let results = collection.query_embedding(&doc.embedding, n_candidates).await;

        let all_types = [FileType::Src, FileType::Tests, FileType::Docs];
        self.collect_results(
            &collection,
            results,
            SIMILAR_MIN_SIMILARITY,
            MAX_SIMILAR_RESULTS,
            &all_types,
            Some(id),
            cancel,
        )
        .await
    }

    /// Drop candidates that are below the floor, outside the type
    /// filter, or stale; schedule deletion for the stale ones.
    #[allow(clippy::too_many_arguments)]
    async fn collect_results(
        &self,
        collection: &Arc<Collection>,
        results: Vec<QueryResult>,
        min_similarity: f32,
        max_results: usize,
        types: &[FileType],
        exclude_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let mut out = Vec::new();
        let mut stale_ids: Vec<String> = Vec::new();

        for result in results {
            if cancel.is_cancelled() {
                return Err(SourcererError::Cancelled);
            }
            if result.similarity < min_similarity || out.len() >= max_results {
                break;
            }
            if exclude_id == Some(result.id.as_str()) {
                continue;
            }

            let Some(doc) = collection.get(&result.id).await else {
                stale_ids.push(result.id);
                continue;
            };
            let chunk = rehydrate(&doc);

            if !types.contains(&chunk.chunk_type) {
                continue;
            }

            // A hit must come from the live version of its file: the
            // file itself fresh, and the record's parse time matching
            // the cache entry.
            let cached = {
                let freshness = self.freshness.read().unwrap_or_else(|p| p.into_inner());
                freshness.get(&chunk.file).copied()
            };
            if cached != Some(chunk.parsed_at) || self.file_is_stale(&chunk.file) {
                stale_ids.push(result.id);
                continue;
            }

            out.push(format!(
                "{} | {} [{}]",
                result.id,
                chunk.summary,
                format_lines(chunk.start_line, chunk.end_line)
            ));
        }

        if !stale_ids.is_empty() {
            tracing::debug!("Reaping {} stale chunks", stale_ids.len());
            let collection = Arc::clone(collection);
            tokio::spawn(async move {
                if let Err(e) = collection.delete_ids(&stale_ids).await {
                    tracing::warn!("Failed to reap stale chunks: {e}");
                }
            });
        }

        Ok(out)
    }

    /// Remove every cached file that no longer exists on disk
    pub async fn cleanup_deleted_files(&self) -> Result<usize> {
        let paths: Vec<String> = {
            let freshness = self.freshness.read().unwrap_or_else(|p| p.into_inner());
            freshness.keys().cloned().collect()
        };

        let mut removed = 0;
        for path in paths {
            if !self.workspace_root.join(&path).exists() {
                tracing::info!("Removing records for deleted file {path}");
                self.remove(&path).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn format_lines(start_line: u32, end_line: u32) -> String {
    if start_line == end_line {
        format!("line {start_line}")
    } else {
        format!("lines {start_line}-{end_line}")
    }
}

fn mtime_secs(path: &Path) -> Option<i64> {
    let mtime = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let secs = mtime.duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(secs as i64)
}

fn to_new_document(chunk: &Chunk) -> NewDocument {
    let mut metadata = HashMap::new();
    metadata.insert("file".to_string(), chunk.file.clone());
    metadata.insert("type".to_string(), chunk.chunk_type.as_str().to_string());
    metadata.insert("path".to_string(), chunk.path.clone());
    metadata.insert("summary".to_string(), chunk.summary.clone());
    metadata.insert("startLine".to_string(), chunk.start_line.to_string());
    metadata.insert("startColumn".to_string(), chunk.start_column.to_string());
    metadata.insert("endLine".to_string(), chunk.end_line.to_string());
    metadata.insert("endColumn".to_string(), chunk.end_column.to_string());
    metadata.insert("parsedAt".to_string(), chunk.parsed_at.to_string());

    NewDocument {
        id: chunk.id(),
        content: chunk.source.clone(),
        metadata,
    }
}

fn rehydrate(doc: &Document) -> Chunk {
    Chunk {
        file: metadata_str(doc, "file"),
        chunk_type: FileType::parse(&metadata_str(doc, "type")).unwrap_or(FileType::Src),
        path: metadata_str(doc, "path"),
        summary: metadata_str(doc, "summary"),
        source: doc.content.clone(),
        start_line: metadata_i64(doc, "startLine") as u32,
        start_column: metadata_i64(doc, "startColumn") as u32,
        end_line: metadata_i64(doc, "endLine") as u32,
        end_column: metadata_i64(doc, "endColumn") as u32,
        parsed_at: metadata_i64(doc, "parsedAt"),
    }
}

fn metadata_str(doc: &Document, key: &str) -> String {
    doc.metadata.get(key).cloned().unwrap_or_default()
}

fn metadata_i64(doc: &Document, key: &str) -> i64 {
    doc.metadata
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}
