//! Embedded persistent vector collection
//!
//! A small document store living under `.sourcerer/db/` at the
//! workspace root: `{id, content, metadata, embedding}` records with
//! add/delete/list and cosine-similarity queries. Embeddings are
//! normalized on insert so similarity is a dot product. Mutations hold
//! the write lock across their whole critical section, which is what
//! makes a per-file replace atomic from a reader's point of view.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::embedding::EmbeddingProvider;
use crate::error::StoreError;

const COLLECTION_FILE: &str = "code.json";

/// A stored record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, String>,
    pub embedding: Vec<f32>,
}

/// A record to be inserted; the collection computes its embedding
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, String>,
}

/// A similarity-search hit
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub id: String,
    pub similarity: f32,
}

/// Persistent collection of embedded documents
pub struct Collection {
    file_path: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    documents: RwLock<HashMap<String, Document>>,
}

impl Collection {
    /// Open (or create) the collection stored under `db_dir`
    pub fn open(
        db_dir: impl AsRef<Path>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, StoreError> {
        let db_dir = db_dir.as_ref();
        fs::create_dir_all(db_dir)
            .map_err(|e| StoreError::OpenFailed(format!("{}: {e}", db_dir.display())))?;

        let file_path = db_dir.join(COLLECTION_FILE);
        let documents = if file_path.exists() {
            let data = fs::read_to_string(&file_path)
                .map_err(|e| StoreError::OpenFailed(format!("{}: {e}", file_path.display())))?;
            let docs: Vec<Document> = serde_json::from_str(&data)
                .map_err(|e| StoreError::OpenFailed(format!("corrupt collection: {e}")))?;
            docs.into_iter().map(|d| (d.id.clone(), d)).collect()
        } else {
            HashMap::new()
        };

        tracing::debug!(
            "Opened collection at {} with {} documents",
            file_path.display(),
            documents.len()
        );

        Ok(Self {
            file_path,
            embedder,
            documents: RwLock::new(documents),
        })
    }

    /// Embed and insert documents, replacing any with the same id
    pub async fn add_documents(&self, docs: Vec<NewDocument>) -> Result<(), StoreError> {
        if docs.is_empty() {
            return Ok(());
        }

        let embedded = self.embed(&docs)?;

        let mut documents = self.documents.write().await;
        for doc in embedded {
            documents.insert(doc.id.clone(), doc);
        }
        self.persist(&documents)
    }

    /// Atomically replace every record whose `file` metadata equals
    /// `file` with `docs`. Readers see either the old set or the new
    /// set, never a mix.
    pub async fn replace_file(&self, file: &str, docs: Vec<NewDocument>) -> Result<(), StoreError> {
        let embedded = self.embed(&docs)?;

        let mut documents = self.documents.write().await;
        documents.retain(|_, doc| doc.metadata.get("file").map(String::as_str) != Some(file));
        for doc in embedded {
            documents.insert(doc.id.clone(), doc);
        }
        self.persist(&documents)
    }

    /// Delete records whose metadata `key` equals `value`
    pub async fn delete_where(&self, key: &str, value: &str) -> Result<usize, StoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, doc| doc.metadata.get(key).map(String::as_str) != Some(value));
        let removed = before - documents.len();

        if removed > 0 {
            self.persist(&documents)?;
        }
        Ok(removed)
    }

    /// Delete records by id
    pub async fn delete_ids(&self, ids: &[String]) -> Result<usize, StoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        for id in ids {
            documents.remove(id);
        }
        let removed = before - documents.len();

        if removed > 0 {
            self.persist(&documents)?;
        }
        Ok(removed)
    }

    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }

    pub async fn list_ids(&self) -> Vec<String> {
        self.documents.read().await.keys().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Embed `text` and query by similarity
    pub async fn query(&self, text: &str, n_results: usize) -> Result<Vec<QueryResult>, StoreError> {
        let mut embeddings = self
            .embedder
            .embed_batch(vec![text.to_string()])
            .map_err(|e| StoreError::SearchFailed(e.to_string()))?;
        let embedding = embeddings
            .pop()
            .ok_or_else(|| StoreError::SearchFailed("no query embedding generated".to_string()))?;

        Ok(self.query_embedding(&normalize(embedding), n_results).await)
    }

    /// Query with an already-computed (normalized) embedding
    pub async fn query_embedding(&self, embedding: &[f32], n_results: usize) -> Vec<QueryResult> {
        let documents = self.documents.read().await;

        let mut results: Vec<QueryResult> = documents
            .values()
            .map(|doc| QueryResult {
                id: doc.id.clone(),
                similarity: dot(embedding, &doc.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(n_results);
        results
    }

    fn embed(&self, docs: &[NewDocument]) -> Result<Vec<Document>, StoreError> {
        let texts: Vec<String> = docs.iter().map(|d| d.content.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(texts)
            .map_err(|e| StoreError::AddFailed(e.to_string()))?;

        if embeddings.len() != docs.len() {
            return Err(StoreError::AddFailed(format!(
                "embedding count mismatch: expected {}, got {}",
                docs.len(),
                embeddings.len()
            )));
        }

        Ok(docs
            .iter()
            .zip(embeddings)
            .map(|(doc, embedding)| Document {
                id: doc.id.clone(),
                content: doc.content.clone(),
                metadata: doc.metadata.clone(),
                embedding: normalize(embedding),
            })
            .collect())
    }

    fn persist(&self, documents: &HashMap<String, Document>) -> Result<(), StoreError> {
        let mut docs: Vec<&Document> = documents.values().collect();
        docs.sort_by(|a, b| a.id.cmp(&b.id));

        let data = serde_json::to_string(&docs)
            .map_err(|e| StoreError::PersistFailed(e.to_string()))?;
        fs::write(&self.file_path, data).map_err(|e| StoreError::PersistFailed(e.to_string()))
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm_sq: f32 = embedding.iter().map(|v| v * v).sum();
    if norm_sq > 0.0 {
        let inv = 1.0 / norm_sq.sqrt();
        for v in &mut embedding {
            *v *= inv;
        }
    }
    embedding
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
