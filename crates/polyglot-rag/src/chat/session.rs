//! In-memory chat sessions
//!
//! Sessions idle for longer than the TTL are dropped whenever a new one is
//! registered, and the least recently active session makes way at capacity.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::types::{ChatTurn, Speaker};

use super::history::ChatHistory;

struct Session {
    history: ChatHistory,
    last_active: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            history: ChatHistory::new(),
            last_active: Utc::now(),
        }
    }
}

/// Chat histories keyed by session ID
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    /// Maximum live sessions
    max_sessions: usize,
    /// Idle lifetime in seconds
    idle_ttl_seconds: u64,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl_seconds: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
            idle_ttl_seconds,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_sessions, config.idle_ttl_secs)
    }

    /// Start an empty session
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.make_room();
        self.sessions.insert(id, Session::new());
        tracing::debug!("Created session {}", id);
        id
    }

    /// Use the given session, registering it if unknown; `None` creates a new one
    pub fn get_or_create(&self, id: Option<Uuid>) -> Uuid {
        match id {
            Some(id) => {
                if let Some(mut session) = self.sessions.get_mut(&id) {
                    session.last_active = Utc::now();
                    return id;
                }
                self.make_room();
                self.sessions.entry(id).or_insert_with(Session::new);
                id
            }
            None => self.create(),
        }
    }

    /// Snapshot of a session's turns
    pub fn history(&self, id: &Uuid) -> Option<Vec<ChatTurn>> {
        self.sessions.get(id).map(|s| s.history.turns().to_vec())
    }

    /// Append one question/answer exchange and return the updated turns
    pub fn record(&self, id: Uuid, question: &str, answer: &str) -> Vec<ChatTurn> {
        if !self.sessions.contains_key(&id) {
            self.make_room();
        }

        let mut session = self.sessions.entry(id).or_insert_with(Session::new);
        session.last_active = Utc::now();
        session.history.push(Speaker::You, question);
        session.history.push(Speaker::Bot, answer);
        session.history.turns().to_vec()
    }

    /// Empty a session's history. Returns false for unknown sessions.
    pub fn clear(&self, id: &Uuid) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut session) => {
                session.history.clear();
                session.last_active = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Drop a session. Returns false for unknown sessions.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop sessions idle for longer than the TTL, returning how many went
    pub fn evict_idle(&self) -> usize {
        let before = self.sessions.len();
        let cutoff = Utc::now() - Duration::seconds(self.idle_ttl_seconds as i64);
        self.sessions.retain(|_, session| session.last_active >= cutoff);

        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    /// Must not be called while holding a guard into `sessions`
    fn make_room(&self) {
        self.evict_idle();

        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.last_active)
                .map(|entry| *entry.key());
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    tracing::debug!("Session store full, dropped session {}", id);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
