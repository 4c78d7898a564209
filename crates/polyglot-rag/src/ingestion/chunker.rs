//! Recursive character text splitting
//!
//! Text is split on the coarsest separator that occurs in it (paragraphs, then
//! lines, then words, then grapheme clusters). Pieces that are still too long
//! are split again with the finer separators, short pieces are packed back
//! together into chunks of at most `chunk_size` characters, and consecutive
//! chunks share up to `overlap` characters.

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::types::{Chunk, Document};

/// Text chunker with configurable size, overlap and separators
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between chunks in characters
    overlap: usize,
    /// Separators from coarsest to finest
    separators: Vec<String>,
}

impl TextChunker {
    /// Create a chunker with the default paragraph/line/word/character separators
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self::with_separators(chunk_size, overlap, ChunkingConfig::default().separators)
    }

    /// Create a chunker with custom separators
    pub fn with_separators(chunk_size: usize, overlap: usize, separators: Vec<String>) -> Self {
        Self {
            chunk_size,
            overlap,
            separators,
        }
    }

    /// Create from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::with_separators(config.chunk_size, config.chunk_overlap, config.separators.clone())
    }

    /// Split a document into indexed chunks
    pub fn split_document(&self, doc: &Document) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self
            .split_text(&doc.content)
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk::new(doc.id, content, doc.source.clone(), i as u32))
            .collect();

        tracing::debug!(
            "Split {} ({} chars) into {} chunks",
            doc.source,
            doc.char_count(),
            chunks.len()
        );

        chunks
    }

    /// Split text into chunks
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // First separator present in the text; the empty one always matches
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];
        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = "";
                break;
            }
            if text.contains(candidate.as_str()) {
                separator = candidate;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut short_pieces: Vec<&str> = Vec::new();
        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                short_pieces.push(piece);
                continue;
            }

            if !short_pieces.is_empty() {
                final_chunks.extend(self.merge_pieces(&short_pieces));
                short_pieces.clear();
            }

            if finer.is_empty() {
                if let Some(chunk) = trimmed(piece) {
                    final_chunks.push(chunk);
                }
            } else {
                final_chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !short_pieces.is_empty() {
            final_chunks.extend(self.merge_pieces(&short_pieces));
        }

        final_chunks
    }

    /// Pack pieces into chunks, carrying the tail of each chunk into the next
    fn merge_pieces(&self, pieces: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size {
                if total > self.chunk_size {
                    tracing::warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total,
                        self.chunk_size
                    );
                }

                if !window.is_empty() {
                    if let Some(chunk) = join_window(&window) {
                        chunks.push(chunk);
                    }

                    while total > self.overlap || (total + len > self.chunk_size && total > 0) {
                        match window.pop_front() {
                            Some((_, dropped)) => total -= dropped,
                            None => break,
                        }
                    }
                }
            }

            window.push_back((piece, len));
            total += len;
        }

        if let Some(chunk) = join_window(&window) {
            chunks.push(chunk);
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::from_config(&ChunkingConfig::default())
    }
}

/// Split on `separator`, attaching each separator to the start of the piece
/// that follows it. An empty separator splits into grapheme clusters.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text.graphemes(true).collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0usize;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(&text[start..idx]);
        }
        start = idx;
    }
    pieces.push(&text[start..]);
    pieces.retain(|p| !p.is_empty());
    pieces
}

fn join_window(window: &VecDeque<(&str, usize)>) -> Option<String> {
    let joined: String = window.iter().map(|(piece, _)| *piece).collect();
    trimmed(&joined)
}

fn trimmed(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.split_text("  GUVI offers courses in Data Science.  ");
        assert_eq!(chunks, vec!["GUVI offers courses in Data Science."]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = TextChunker::new(500, 50);
        assert!(chunker.split_text("").is_empty());
        assert!(chunker.split_text(" \n\n \n").is_empty());
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let first = format!("First {}", "a".repeat(294));
        let second = format!("Second {}", "b".repeat(293));
        let text = format!("{}\n\n{}", first, second);

        let chunker = TextChunker::new(500, 50);
        assert_eq!(chunker.split_text(&text), vec![first, second]);
    }

    #[test]
    fn test_chunks_respect_size_and_overlap() {
        let chunker = TextChunker::new(50, 10);
        let chunks = chunker.split_text(&numbered_words(200));

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50, "chunk too long: {:?}", chunk);
        }
        for pair in chunks.windows(2) {
            let first_word = pair[1].split_whitespace().next().unwrap();
            assert!(
                pair[0].split_whitespace().any(|w| w == first_word),
                "no overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_unbroken_text_falls_back_to_characters() {
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.split_text(&"a".repeat(1200));

        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![500, 500, 300]);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let tamil = "தமிழ் ".repeat(120);
        let chunker = TextChunker::new(100, 10);
        for chunk in chunker.split_text(&tamil) {
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn test_split_keeping_separator() {
        assert_eq!(split_keeping_separator("a\n\nb", "\n\n"), vec!["a", "\n\nb"]);
        assert_eq!(
            split_keeping_separator("\n\n\n\nb", "\n\n"),
            vec!["\n\n", "\n\nb"]
        );
        assert_eq!(split_keeping_separator("ab", ""), vec!["a", "b"]);
    }

    #[test]
    fn test_split_document_indexes_chunks() {
        let doc = Document::new("corpus.txt", numbered_words(300));
        let chunks = TextChunker::new(100, 20).split_document(&doc);

        assert!(chunks.len() > 2);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i as u32);
            assert_eq!(chunk.document_id, doc.id);
            assert_eq!(chunk.source, "corpus.txt");
        }
    }
}
