//! Conversation layer: FAQ fallback, per-session history and message handling

mod history;
mod knowledge_base;
mod service;
mod session;

pub use history::ChatHistory;
pub use knowledge_base::{KnowledgeBase, FALLBACK_RESPONSE};
pub use service::{ChatOutcome, ChatService};
pub use session::SessionStore;
