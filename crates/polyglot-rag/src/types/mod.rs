//! Core types shared across the pipeline and the chat layer

pub mod document;
pub mod response;

pub use document::{Chunk, Document};
pub use response::{AnsweredBy, ChatReply, ChatTurn, RagAnswer, SearchHit, SourceSnippet, Speaker};
