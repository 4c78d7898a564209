//! Response types for retrieval and chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::Chunk;

/// One retrieval result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Squared Euclidean distance to the query (lower is closer)
    pub distance: f32,
    /// Similarity score (0.0-1.0, higher is better)
    pub similarity: f32,
}

/// Source chunk reported alongside a generated answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSnippet {
    /// Chunk ID
    pub chunk_id: Uuid,
    /// Document path
    pub source: String,
    /// Chunk text
    pub snippet: String,
    /// Similarity score (0.0-1.0)
    pub similarity: f32,
}

impl From<&SearchHit> for SourceSnippet {
    fn from(hit: &SearchHit) -> Self {
        Self {
            chunk_id: hit.chunk.id,
            source: hit.chunk.source.clone(),
            snippet: hit.chunk.content.clone(),
            similarity: hit.similarity,
        }
    }
}

/// Cleaned answer from the RAG pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagAnswer {
    /// Post-processed English answer (may be empty)
    pub answer: String,
    /// Chunks the answer was grounded on
    pub sources: Vec<SourceSnippet>,
}

impl RagAnswer {
    /// An answer with no content
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the answer carries any text
    pub fn is_empty(&self) -> bool {
        self.answer.trim().is_empty()
    }
}

/// Who said a chat line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Speaker {
    You,
    Bot,
}

impl Speaker {
    /// Label shown in the chat history
    pub fn label(&self) -> &'static str {
        match self {
            Self::You => "You",
            Self::Bot => "Bot",
        }
    }

    /// Avatar shown before the label
    pub fn icon(&self) -> &'static str {
        match self {
            Self::You => "👤",
            Self::Bot => "🤖",
        }
    }
}

/// One line of chat history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time
    pub fn new(speaker: Speaker, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Where the bot response came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnsweredBy {
    /// Retrieval-augmented generation over the corpus
    Rag,
    /// Answer served from the answer cache
    Cache,
    /// Static FAQ table or its fallback text
    Faq,
}

/// Reply to a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Session the message belongs to (None for blank input without a session)
    pub session_id: Option<Uuid>,
    /// ISO 639-1 code the message was processed as
    pub detected_language: Option<String>,
    /// English form of the message sent to the pipeline
    pub english_query: Option<String>,
    /// Final answer in the user's language (None for blank input)
    pub answer: Option<String>,
    /// Which stage produced the answer
    pub answered_by: Option<AnsweredBy>,
    /// Chunks the answer was grounded on
    pub sources: Vec<SourceSnippet>,
    /// Full session history after this message
    pub history: Vec<ChatTurn>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_answer_blank_is_empty() {
        let answer = RagAnswer {
            answer: "   \n".to_string(),
            sources: Vec::new(),
        };
        assert!(answer.is_empty());
        assert!(RagAnswer::empty().is_empty());
    }

    #[test]
    fn test_answered_by_serializes_lowercase() {
        let json = serde_json::to_string(&AnsweredBy::Faq).unwrap();
        assert_eq!(json, "\"faq\"");
    }
}
