//! EndSessionHandler - Command handler for discarding a conversation.
//!
//! Ending drops the context and its mood log immediately. Ending an
//! unknown or already-ended session succeeds.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

/// Handler for ending sessions.
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<(), SessionError> {
        if self.store.remove(&session_id).await? {
            tracing::info!(session_id = %session_id, "session ended");
        }
        Ok(())
    }
}
