use serde::{Deserialize, Serialize};

use crate::types::{ChatTurn, Speaker};

/// Ordered chat transcript of one conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, speaker: Speaker, message: impl Into<String>) {
        self.turns.push(ChatTurn::new(speaker, message));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Turns in the order they were added
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
