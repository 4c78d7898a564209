//! Answer generation with an LLM and answer post-processing

pub mod cleanup;
pub mod ollama;
pub mod prompt;

pub use cleanup::clean_answer;
pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text generation backends
///
/// Implementations:
/// - `OllamaClient`: Local Ollama server (phi3, llama3.2, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion for a fully built prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get the model being used
    fn model(&self) -> String;
}
