//! Embedding providers for corpus chunks and queries

mod ollama;
mod onnx_embedder;

pub use ollama::OllamaEmbedder;
pub use onnx_embedder::OnnxEmbedder;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AppConfig, EmbeddingBackend};
use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementations:
/// - `OnnxEmbedder`: all-MiniLM-L6-v2 through ONNX Runtime
/// - `OllamaEmbedder`: Local Ollama server (nomic-embed-text)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch)
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Build the embedding provider selected in the configuration
pub async fn create_embedder(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.embeddings.backend {
        EmbeddingBackend::Onnx => {
            let embedder = OnnxEmbedder::new(&config.embeddings).await?;
            Ok(Arc::new(embedder))
        }
        EmbeddingBackend::Ollama => {
            let embedder = OllamaEmbedder::new(&config.llm, config.embeddings.dimensions)?;
            Ok(Arc::new(embedder))
        }
    }
}
