//! API routes for the chat server

pub mod chat;
pub mod sessions;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::language::LanguageSelection;
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(chat::send_message))
        // Sessions
        .route("/sessions/:id/history", get(sessions::get_history))
        .route("/sessions/:id/clear", post(sessions::clear_session))
        .route("/sessions/:id", delete(sessions::delete_session))
        // Cache
        .route("/cache/stats", get(cache_stats))
        // Info
        .route("/languages", get(languages))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let pipeline = state.chat().pipeline();

    Json(serde_json::json!({
        "name": "polyglot-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Multilingual chatbot answering from a fixed corpus with RAG",
        "models": {
            "embeddings": pipeline.embedder_name(),
            "generation": pipeline.model(),
        },
        "corpus": {
            "path": state.config().corpus.path.display().to_string(),
            "chunks": pipeline.chunk_count(),
        },
        "endpoints": {
            "GET /": "Chat page",
            "POST /api/chat": "Send a message ({session_id?, message, language?})",
            "GET /api/sessions/:id/history": "Session history",
            "POST /api/sessions/:id/clear": "Clear a session's history",
            "DELETE /api/sessions/:id": "Delete a session",
            "GET /api/languages": "Language selector options",
            "GET /api/cache/stats": "Answer cache statistics"
        }
    }))
}

/// One option of the language selector
#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub label: &'static str,
    /// ISO 639-1 code; absent for automatic detection
    pub code: Option<&'static str>,
}

/// Language selector options in display order
async fn languages() -> Json<Vec<LanguageOption>> {
    let options = LanguageSelection::labels()
        .into_iter()
        .map(|label| LanguageOption {
            label,
            code: match LanguageSelection::from_label(label) {
                LanguageSelection::Auto => None,
                LanguageSelection::Manual(lang) => Some(lang.code()),
            },
        })
        .collect();

    Json(options)
}

/// Answer cache statistics
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(
        state
            .chat()
            .cache()
            .map(|cache| cache.stats())
            .unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::Value;

    use crate::generation::MockLlmProvider;
    use crate::server::build_router;
    use crate::server::tests::{send, test_state};
    use crate::translation::MockTranslator;

    #[tokio::test]
    async fn test_languages_in_selector_order() {
        let router = build_router(test_state(MockLlmProvider::new(), MockTranslator::new()).await);

        let (status, body) = send(&router, Method::GET, "/api/languages", None).await;
        assert_eq!(status, StatusCode::OK);

        let options: Value = serde_json::from_slice(&body).unwrap();
        let labels: Vec<&str> = options
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["label"].as_str().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["Auto Detect", "English", "Tamil", "Hindi", "Telugu", "Kannada"]
        );
        assert!(options[0]["code"].is_null());
        assert_eq!(options[2]["code"], "ta");
    }

    #[tokio::test]
    async fn test_info_reports_models() {
        let mut llm = MockLlmProvider::new();
        llm.expect_model().returning(|| "phi3".to_string());
        let router = build_router(test_state(llm, MockTranslator::new()).await);

        let (status, body) = send(&router, Method::GET, "/api/info", None).await;
        assert_eq!(status, StatusCode::OK);

        let info: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(info["name"], "polyglot-rag");
        assert_eq!(info["models"]["embeddings"], "keyword");
        assert_eq!(info["models"]["generation"], "phi3");
        assert_eq!(info["corpus"]["chunks"], 4);
    }

    #[tokio::test]
    async fn test_cache_stats_count_entries() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok("Certificates are awarded.".to_string()));
        let router = build_router(test_state(llm, MockTranslator::new()).await);

        send(
            &router,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({ "message": "certificate?", "language": "English" })),
        )
        .await;

        let (status, body) = send(&router, Method::GET, "/api/cache/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        let stats: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats["enabled"], true);
        assert_eq!(stats["entries"], 1);
    }
}
