//! Retrieval-augmented answer generation

use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Error, Result};
use crate::generation::{clean_answer, LlmProvider, PromptBuilder};
use crate::ingestion::{load_document, TextChunker};
use crate::types::{Chunk, RagAnswer, SourceSnippet};

use super::index::FlatIndex;

/// Fixed knobs of the pipeline
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Chunks retrieved per query
    pub top_k: usize,
    /// Organization named in the prompt
    pub organization: String,
    /// Sentences kept from the model output
    pub max_sentences: usize,
}

impl PipelineSettings {
    /// Take settings from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            top_k: config.retrieval.top_k,
            organization: config.generation.organization.clone(),
            max_sentences: config.generation.max_sentences,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Corpus index plus the models that answer questions over it
pub struct RagPipeline {
    index: FlatIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    settings: PipelineSettings,
}

impl RagPipeline {
    /// Load the corpus, split it, embed every chunk and index the result
    pub async fn build(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let document = load_document(&config.corpus.path).await?;
        let chunks = TextChunker::from_config(&config.chunking).split_document(&document);

        Self::from_chunks(chunks, embedder, llm, PipelineSettings::from_config(config)).await
    }

    /// Build the index from already split chunks
    pub async fn from_chunks(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: PipelineSettings,
    ) -> Result<Self> {
        let start = Instant::now();

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "Got {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut index = FlatIndex::new(embedder.dimensions());
        for (chunk, embedding) in chunks.into_iter().zip(embeddings.iter()) {
            index.add(chunk, embedding)?;
        }

        tracing::info!(
            "Indexed {} chunks with {} embeddings in {}ms",
            index.len(),
            embedder.name(),
            start.elapsed().as_millis()
        );

        Ok(Self {
            index,
            embedder,
            llm,
            settings,
        })
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    /// Pipeline settings
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Name of the embedding backend
    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Generation model
    pub fn model(&self) -> String {
        self.llm.model()
    }

    /// Answer an English question from the corpus
    pub async fn answer(&self, query: &str) -> Result<RagAnswer> {
        if self.index.is_empty() {
            tracing::warn!("Index is empty, skipping generation");
            return Ok(RagAnswer::empty());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let hits = self.index.search(&query_embedding, self.settings.top_k)?;

        tracing::debug!(
            "Retrieved {} chunks (best similarity {:.3})",
            hits.len(),
            hits.first().map(|h| h.similarity).unwrap_or(0.0)
        );

        let context = PromptBuilder::build_context(&hits);
        let prompt = PromptBuilder::build_qa_prompt(&self.settings.organization, &context, query);

        let raw = self.llm.generate(&prompt).await?;
        let answer = clean_answer(&raw, self.settings.max_sentences);

        Ok(RagAnswer {
            answer,
            sources: hits.iter().map(SourceSnippet::from).collect(),
        })
    }

    /// Best-effort variant of [`answer`](Self::answer): any failure yields an empty answer
    pub async fn generate_answer(&self, query: &str) -> RagAnswer {
        match self.answer(query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("RAG pipeline failed for query: {}", e);
                RagAnswer::empty()
            }
        }
    }
}
