//! Deterministic mock embedder for tests
//!
//! Generates embeddings from a text hash so tests never need to load
//! a real model.

use std::hash::{DefaultHasher, Hash, Hasher};

use anyhow::Result;

use super::EmbeddingProvider;

/// A mock embedder that produces deterministic vectors from text hashes.
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self { dimension: 384 }
    }
}

impl EmbeddingProvider for MockEmbedder {
    fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let embeddings = texts
            .iter()
            .map(|text| {
                let mut hasher = DefaultHasher::new();
                text.hash(&mut hasher);
                let bytes = hasher.finish().to_le_bytes();

                let mut embedding = Vec::with_capacity(self.dimension);
                for i in 0..self.dimension {
                    embedding.push(bytes[i % 8] as f32 / 255.0);
                }

                // L2 normalize
                let norm_sq: f32 = embedding.iter().map(|v| v * v).sum();
                if norm_sq > 0.0 {
                    let inv = 1.0 / norm_sq.sqrt();
                    for v in &mut embedding {
                        *v *= inv;
                    }
                }

                embedding
            })
            .collect();

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}
