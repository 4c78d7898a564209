//! Chat endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use std::time::Instant;
use uuid::Uuid;

use crate::error::Result;
use crate::language::LanguageSelection;
use crate::server::state::AppState;
use crate::types::ChatReply;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Existing session; omitted or unknown IDs start a session
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// User message in any supported language
    pub message: String,
    /// Selector label ("Auto Detect", "Tamil", ...) or ISO code
    #[serde(default)]
    pub language: Option<String>,
}

/// POST /api/chat - Answer a message and append it to the session
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let start = Instant::now();

    let selection = request
        .language
        .as_deref()
        .map(LanguageSelection::from_label)
        .unwrap_or_default();

    let reply = match state.chat().respond(&request.message, selection).await {
        Some(outcome) => {
            let session_id = state.sessions().get_or_create(request.session_id);
            let history = state
                .sessions()
                .record(session_id, &request.message, &outcome.answer);

            ChatReply {
                session_id: Some(session_id),
                detected_language: Some(outcome.language),
                english_query: Some(outcome.english_query),
                answer: Some(outcome.answer),
                answered_by: Some(outcome.answered_by),
                sources: outcome.sources,
                history,
                processing_time_ms: start.elapsed().as_millis() as u64,
            }
        }
        // Blank input never registers a session
        None => ChatReply {
            session_id: request.session_id,
            detected_language: None,
            english_query: None,
            answer: None,
            answered_by: None,
            sources: Vec::new(),
            history: request
                .session_id
                .and_then(|id| state.sessions().history(&id))
                .unwrap_or_default(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        },
    };

    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::generation::MockLlmProvider;
    use crate::server::build_router;
    use crate::server::tests::{send, test_state};
    use crate::translation::MockTranslator;

    #[tokio::test]
    async fn test_manual_language_translates_both_ways() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok(String::new()));

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|_: &str, _: &str, target: &str| target == "en")
            .returning(|_, _, _| Ok("tell me about guvi?".to_string()));
        translator
            .expect_translate()
            .withf(|_: &str, source: &str, target: &str| source == "en" && target == "hi")
            .returning(|_, _, _| Ok("GUVI एक ऑनलाइन लर्निंग प्लेटफ़ॉर्म है।".to_string()));

        let router = build_router(test_state(llm, translator).await);

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/chat",
            Some(json!({ "message": "GUVI के बारे में बताओ?", "language": "Hindi" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let reply: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply["detected_language"], "hi");
        assert_eq!(reply["english_query"], "tell me about guvi?");
        assert_eq!(reply["answered_by"], "faq");
        assert_eq!(reply["answer"], "GUVI एक ऑनलाइन लर्निंग प्लेटफ़ॉर्म है।");
        assert_eq!(reply["history"][1]["speaker"], "Bot");
    }

    #[tokio::test]
    async fn test_existing_session_accumulates_turns() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok("Yes.".to_string()));
        let state = test_state(llm, MockTranslator::new()).await;
        let router = build_router(state.clone());
        let id = state.sessions().create();

        for message in ["certificate?", "placement?"] {
            send(
                &router,
                Method::POST,
                "/api/chat",
                Some(json!({ "session_id": id, "message": message, "language": "English" })),
            )
            .await;
        }

        assert_eq!(state.sessions().history(&id).unwrap().len(), 4);
        assert_eq!(state.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_long_english_message_answered_without_translation() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok("Yes.".to_string()));
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);
        let router = build_router(test_state(llm, translator).await);

        let message = "Does GUVI provide certificates? ".repeat(200);
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/chat",
            Some(json!({ "message": message, "language": "English" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let reply: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply["answer"], "Yes.");
    }

    #[tokio::test]
    async fn test_blank_messages_do_not_create_sessions() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().times(0);
        let state = test_state(llm, MockTranslator::new()).await;
        let router = build_router(state.clone());

        for _ in 0..20 {
            let (status, body) =
                send(&router, Method::POST, "/api/chat", Some(json!({ "message": "  " }))).await;
            assert_eq!(status, StatusCode::OK);
            let reply: Value = serde_json::from_slice(&body).unwrap();
            assert!(reply["session_id"].is_null());
        }

        assert!(state.sessions().is_empty());
    }
}
