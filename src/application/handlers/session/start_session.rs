//! StartSessionHandler - Command handler for opening a conversation.

use std::sync::Arc;

use crate::domain::composer::ResponseComposer;
use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionContext, SessionError, SessionLimits};
use crate::ports::SessionStore;

/// Result of successful session creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    /// Greeting shown before the user's first message.
    pub welcome_message: String,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
    composer: ResponseComposer,
    limits: SessionLimits,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, composer: ResponseComposer, limits: SessionLimits) -> Self {
        Self {
            store,
            composer,
            limits,
        }
    }

    pub async fn handle(&self) -> Result<StartSessionResult, SessionError> {
        let session_id = SessionId::new();
        self.store
            .insert(SessionContext::new(session_id, self.limits))
            .await?;

        tracing::info!(session_id = %session_id, "session started");

        Ok(StartSessionResult {
            session_id,
            welcome_message: self.composer.welcome(),
        })
    }
}
