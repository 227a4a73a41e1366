//! Embedding generation
//!
//! The vector collection treats the embedding model as a black box
//! behind [`EmbeddingProvider`].

mod fastembed_manager;
pub mod mock;

pub use fastembed_manager::FastEmbedManager;
pub use mock::MockEmbedder;

use anyhow::Result;

/// Trait for embedding generation
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of text
    fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Get the dimension of the embeddings
    fn dimension(&self) -> usize;

    /// Get the model name
    fn model_name(&self) -> &str;
}
