//! Answer caching keyed by the English query
//!
//! The corpus is fixed for the lifetime of the process, so entries only
//! expire by age or get evicted at capacity.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::config::CacheConfig;
use crate::types::RagAnswer;

/// Cached answer with metadata
#[derive(Debug, Clone)]
pub struct CachedAnswer {
    /// English question as first asked
    pub question: String,
    /// The pipeline answer
    pub answer: RagAnswer,
    /// When this was cached
    pub cached_at: DateTime<Utc>,
    /// Number of cache hits
    pub hit_count: u32,
}

/// TTL and capacity bounded answer cache
pub struct AnswerCache {
    /// Cache entries keyed by question hash
    cache: RwLock<HashMap<String, CachedAnswer>>,
    /// Maximum cache size
    max_entries: usize,
    /// TTL for cache entries (seconds)
    ttl_seconds: u64,
}

impl AnswerCache {
    /// Create a new answer cache
    pub fn new(max_entries: usize, ttl_seconds: u64) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
            ttl_seconds,
        }
    }

    /// Build from configuration; `None` when caching is disabled
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.max_entries, config.ttl_secs))
    }

    /// Hash a question for cache key
    fn hash_question(question: &str) -> String {
        let normalized = question.trim().to_lowercase();
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get a cached answer unless missing or expired
    pub fn get(&self, question: &str) -> Option<RagAnswer> {
        let key = Self::hash_question(question);
        let mut cache = self.cache.write();

        let entry = cache.get_mut(&key)?;

        let age = Utc::now().signed_duration_since(entry.cached_at);
        if age.num_seconds().max(0) as u64 > self.ttl_seconds {
            tracing::debug!("Cache miss (TTL expired): {}", &key[..12]);
            cache.remove(&key);
            return None;
        }

        entry.hit_count += 1;
        tracing::debug!("Cache hit: {} (hits: {})", &key[..12], entry.hit_count);
        Some(entry.answer.clone())
    }

    /// Store an answer; empty answers are ignored
    pub fn put(&self, question: &str, answer: &RagAnswer) {
        if answer.is_empty() {
            return;
        }

        let key = Self::hash_question(question);
        let entry = CachedAnswer {
            question: question.to_string(),
            answer: answer.clone(),
            cached_at: Utc::now(),
            hit_count: 0,
        };

        let mut cache = self.cache.write();
        if cache.len() >= self.max_entries && !cache.contains_key(&key) {
            if let Some(oldest_key) = cache
                .iter()
                .min_by_key(|(_, v)| v.cached_at)
                .map(|(k, _)| k.clone())
            {
                cache.remove(&oldest_key);
            }
        }
        cache.insert(key.clone(), entry);

        tracing::debug!("Cached answer: {}", &key[..12]);
    }

    /// Number of cached answers
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.write().clear();
        tracing::info!("Answer cache cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.read();
        let total_hits: u32 = cache.values().map(|e| e.hit_count).sum();

        CacheStats {
            enabled: true,
            entries: cache.len(),
            total_hits,
            max_entries: self.max_entries,
            ttl_seconds: self.ttl_seconds,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub entries: usize,
    pub total_hits: u32,
    pub max_entries: usize,
    pub ttl_seconds: u64,
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new(1000, 3600)
    }
}
