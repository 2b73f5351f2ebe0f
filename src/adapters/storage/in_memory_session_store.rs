//! In-Memory Session Store Adapter
//!
//! Holds live session contexts in process memory. Nothing is written to
//! disk; a context disappears the moment its session is removed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionContext, SessionError};
use crate::ports::{SessionHandle, SessionStore};

/// In-memory map from session id to a lockable context.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every session (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, context: SessionContext) -> Result<SessionHandle, SessionError> {
        let id = *context.session_id();
        let handle = Arc::new(Mutex::new(context));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(SessionError::UnknownSession(*id))
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn purge_idle(
        &self,
        idle_timeout: Duration,
        now: Timestamp,
    ) -> Result<Vec<SessionId>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let mut purged = Vec::new();

        sessions.retain(|id, handle| {
            // A locked context has a turn in flight and is by definition active
            let idle = match handle.try_lock() {
                Ok(context) => context.is_idle(idle_timeout, &now),
                Err(_) => false,
            };
            if idle {
                purged.push(*id);
            }
            !idle
        });

        Ok(purged)
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
