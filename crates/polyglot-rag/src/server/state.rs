//! Application state for the chat server

use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::chat::{ChatService, SessionStore};
use crate::config::AppConfig;
use crate::embeddings::create_embedder;
use crate::error::Result;
use crate::generation::OllamaClient;
use crate::retrieval::RagPipeline;
use crate::translation::GoogleTranslator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Message handling over the RAG pipeline
    chat: ChatService,
    /// Per-client chat histories
    sessions: SessionStore,
    /// Base64-encoded logo, if it could be read
    logo: Option<String>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state: embed the corpus and wire the services
    pub async fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing chat application state...");

        let llm = Arc::new(OllamaClient::new(&config.llm)?);
        tracing::info!("Ollama client initialized (model: {})", config.llm.generate_model);

        let embedder = create_embedder(&config).await?;
        tracing::info!("Embedding provider initialized ({})", embedder.name());

        let pipeline = RagPipeline::build(&config, embedder, llm).await?;
        tracing::info!(
            "RAG pipeline ready with {} chunks from {}",
            pipeline.chunk_count(),
            config.corpus.path.display()
        );

        let translator = Arc::new(GoogleTranslator::new(&config.translation)?);
        let chat = ChatService::from_config(&config, Arc::new(pipeline), translator);

        let logo = load_logo(&config.corpus.logo_path);

        Ok(Self::from_parts(config, chat, logo))
    }

    /// Assemble state from prebuilt parts
    pub fn from_parts(config: AppConfig, chat: ChatService, logo: Option<String>) -> Self {
        let sessions = SessionStore::from_config(&config.sessions);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                chat,
                sessions,
                logo,
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get chat service
    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }

    /// Get session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Base64 logo for the chat page
    pub fn logo(&self) -> Option<&str> {
        self.inner.logo.as_deref()
    }

    /// Check if ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}

/// Read and base64-encode the logo. Failures are logged and yield `None`.
pub fn load_logo(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => {
            tracing::debug!("Loaded logo {} ({} bytes)", path.display(), bytes.len());
            Some(STANDARD.encode(bytes))
        }
        Err(e) => {
            tracing::warn!("Logo {} not loaded: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_logo_encodes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(load_logo(file.path()).as_deref(), Some("iVBORw=="));
    }

    #[test]
    fn test_missing_logo_is_none() {
        assert!(load_logo(Path::new("/definitely/not/here/logo.png")).is_none());
    }
}
