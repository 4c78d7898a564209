//! Corpus document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A loaded corpus file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Path the text was read from
    pub source: String,
    /// Full file content
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content: content.into(),
        }
    }

    /// Character count of the content
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// A piece of a document that gets embedded and retrieved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Chunk text
    pub content: String,
    /// Path of the parent document
    pub source: String,
    /// Position of this chunk within the document
    pub index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document_id: Uuid, content: String, source: String, index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content,
            source,
            index,
        }
    }
}
