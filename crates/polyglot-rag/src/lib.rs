//! polyglot-rag: Multilingual question answering over a fixed knowledge corpus
//!
//! Incoming messages are language-detected (or manually tagged), translated to
//! English, answered by a retrieval-augmented generation pipeline backed by a
//! local ONNX embedder and an Ollama-hosted LLM, and translated back. A static
//! FAQ table answers when the pipeline comes back empty.

pub mod cache;
pub mod chat;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod language;
pub mod retrieval;
pub mod server;
pub mod translation;
pub mod types;

pub use chat::{ChatHistory, ChatService, KnowledgeBase, SessionStore};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use language::{Language, LanguageSelection};
pub use retrieval::RagPipeline;
pub use types::{
    document::{Chunk, Document},
    response::{ChatReply, ChatTurn, RagAnswer, Speaker},
};
