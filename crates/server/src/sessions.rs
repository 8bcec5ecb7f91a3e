//! Logged-in portal sessions, keyed by opaque bearer tokens.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use repartos_core::Session;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::metrics::SESSIONS_ACTIVE;

struct StoredSession {
    session: Arc<Session>,
    last_used: Instant,
}

/// In-memory session store.
///
/// Logout removes a session and the cookie jar goes with it. Sessions left
/// idle are dropped by [`SessionStore::sweep_idle`]. Nothing survives a
/// restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its new token.
    pub async fn insert(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.clone(),
            StoredSession {
                session: Arc::new(session),
                last_used: Instant::now(),
            },
        );
        SESSIONS_ACTIVE.set(sessions.len() as i64);
        token
    }

    /// Look up a session and mark it as used.
    pub async fn get(&self, token: &str) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(token)?;
        stored.last_used = Instant::now();
        Some(stored.session.clone())
    }

    /// Drop a session. Returns it if the token was known.
    pub async fn remove(&self, token: &str) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token).map(|stored| stored.session);
        SESSIONS_ACTIVE.set(sessions.len() as i64);
        removed
    }

    /// Drop every session unused for at least `max_idle`. Returns how many went.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.last_used.elapsed() < max_idle);
        SESSIONS_ACTIVE.set(sessions.len() as i64);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
