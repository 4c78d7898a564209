//! Exact in-memory vector index

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::types::{Chunk, SearchHit};

/// Brute-force index ranking chunks by squared Euclidean distance
pub struct FlatIndex {
    /// Embedding dimensions
    dimensions: usize,
    /// Row-major vector storage
    vectors: Vec<f32>,
    /// Chunks in insertion order, parallel to `vectors`
    chunks: Vec<Chunk>,
}

impl FlatIndex {
    /// Create an empty index
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Add a chunk with its embedding
    pub fn add(&mut self, chunk: Chunk, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::index(format!(
                "Embedding for chunk {} has {} dimensions, index expects {}",
                chunk.index,
                embedding.len(),
                self.dimensions
            )));
        }

        self.vectors.extend_from_slice(embedding);
        self.chunks.push(chunk);
        Ok(())
    }

    /// Return the `k` nearest chunks, closest first
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(Error::index(format!(
                "Query has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(self.dimensions)
            .map(|stored| squared_l2(stored, query))
            .enumerate()
            .collect();

        // Stable sort keeps insertion order among equal distances
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, distance)| SearchHit {
                chunk: self.chunks[i].clone(),
                distance,
                similarity: (1.0 - distance / 2.0).clamp(0.0, 1.0),
            })
            .collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn chunk(content: &str, index: u32) -> Chunk {
        Chunk::new(Uuid::nil(), content.to_string(), "corpus.txt".to_string(), index)
    }

    fn index_with(vectors: &[(&str, [f32; 2])]) -> FlatIndex {
        let mut index = FlatIndex::new(2);
        for (i, (content, vector)) in vectors.iter().enumerate() {
            index.add(chunk(content, i as u32), vector).unwrap();
        }
        index
    }

    #[test]
    fn test_nearest_first() {
        let index = index_with(&[
            ("east", [1.0, 0.0]),
            ("north", [0.0, 1.0]),
            ("north-east", [0.7071, 0.7071]),
        ]);

        let hits = index.search(&[0.0, 1.0], 2).unwrap();
        let contents: Vec<&str> = hits.iter().map(|h| h.chunk.content.as_str()).collect();
        assert_eq!(contents, vec!["north", "north-east"]);
        assert!(hits[0].distance.abs() < 1e-6);
        assert!((hits[0].similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = index_with(&[("a", [1.0, 0.0]), ("b", [0.0, 1.0])]);
        assert_eq!(index.search(&[1.0, 0.0], 10).unwrap().len(), 2);
        assert!(index.search(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = index_with(&[("first", [1.0, 0.0]), ("second", [1.0, 0.0])]);
        let hits = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].chunk.content, "first");
        assert_eq!(hits[1].chunk.content, "second");
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = FlatIndex::new(3);
        assert!(matches!(index.add(chunk("x", 0), &[1.0, 0.0]), Err(Error::Index(_))));
        assert!(matches!(index.search(&[1.0], 1), Err(Error::Index(_))));
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        let index = FlatIndex::new(2);
        assert!(index.search(&[1.0, 0.0], 3).unwrap().is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_opposite_vectors_have_zero_similarity() {
        let index = index_with(&[("west", [-1.0, 0.0])]);
        let hits = index.search(&[1.0, 0.0], 1).unwrap();
        assert!((hits[0].distance - 4.0).abs() < 1e-6);
        assert_eq!(hits[0].similarity, 0.0);
    }
}
