use super::EmbeddingProvider;
use anyhow::{Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::RwLock;

const MODEL_NAME: &str = "all-MiniLM-L6-v2";
const MODEL_DIMENSION: usize = 384;

/// FastEmbed-based embedding provider using all-MiniLM-L6-v2
///
/// Uses RwLock for interior mutability since fastembed's embed() requires &mut self.
pub struct FastEmbedManager {
    model: RwLock<TextEmbedding>,
}

impl FastEmbedManager {
    /// Create a new FastEmbedManager with the default model (all-MiniLM-L6-v2)
    pub fn new() -> Result<Self> {
        tracing::info!("Initializing FastEmbed model: {}", MODEL_NAME);

        let options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);

        let model =
            TextEmbedding::try_new(options).context("Failed to initialize FastEmbed model")?;

        Ok(Self {
            model: RwLock::new(model),
        })
    }
}

impl EmbeddingProvider for FastEmbedManager {
    fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        tracing::debug!("Generating embeddings for {} texts", texts.len());

        // If the lock is poisoned (a panic while embedding), recover by
        // taking ownership of the inner value.
        let mut model = self.model.write().unwrap_or_else(|poisoned| {
            tracing::warn!("FastEmbed model lock was poisoned, recovering...");
            poisoned.into_inner()
        });

        let embeddings = model
            .embed(texts, None)
            .context("Failed to generate embeddings")?;

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        MODEL_DIMENSION
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}
