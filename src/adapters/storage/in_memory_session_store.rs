//! In-Memory Session Store Adapter
//!
//! Keeps one lockable session per user for the process lifetime.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::UserId;
use crate::domain::prompt::{Session, DEFAULT_HISTORY_CAPACITY};
use crate::ports::{SessionHandle, SessionStore};

/// In-memory storage for conversation sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, SessionHandle>>>,
    history_capacity: usize,
}

impl InMemorySessionStore {
    /// Create a new store with the default history capacity
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a store whose new sessions keep `capacity` history entries
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            history_capacity: capacity,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session(&self, user_id: &UserId) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(user_id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        let handle = sessions.entry(*user_id).or_insert_with(|| {
            tracing::debug!(user_id = %user_id, "Creating session");
            Arc::new(Mutex::new(Session::with_history_capacity(
                *user_id,
                self.history_capacity,
            )))
        });
        Arc::clone(handle)
    }
}
