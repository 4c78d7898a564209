//! Retrieval over the corpus and the end-to-end RAG pipeline

mod index;
mod pipeline;

pub use index::FlatIndex;
pub use pipeline::{PipelineSettings, RagPipeline};

#[cfg(test)]
pub(crate) use pipeline::tests::{corpus_chunks, KeywordEmbedder};
