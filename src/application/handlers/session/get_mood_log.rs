//! Mood query handlers.
//!
//! Read-only snapshots of a live session's mood log, for the UI's
//! visualization collaborator. Nothing here outlives the session.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::SessionId;
use crate::domain::session::{MoodEntry, MoodSummary, SessionError};
use crate::ports::SessionStore;

use super::live_session::lock_live_session;

/// Handler returning the mood log, oldest first.
pub struct GetMoodLogHandler {
    store: Arc<dyn SessionStore>,
    idle_timeout: Duration,
}

impl GetMoodLogHandler {
    pub fn new(store: Arc<dyn SessionStore>, idle_timeout: Duration) -> Self {
        Self {
            store,
            idle_timeout,
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<Vec<MoodEntry>, SessionError> {
        let context = lock_live_session(self.store.as_ref(), &session_id, self.idle_timeout).await?;
        Ok(context.mood_snapshot())
    }
}

/// Handler returning aggregate mood statistics.
pub struct GetMoodSummaryHandler {
    store: Arc<dyn SessionStore>,
    idle_timeout: Duration,
}

impl GetMoodSummaryHandler {
    pub fn new(store: Arc<dyn SessionStore>, idle_timeout: Duration) -> Self {
        Self {
            store,
            idle_timeout,
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<MoodSummary, SessionError> {
        let context = lock_live_session(self.store.as_ref(), &session_id, self.idle_timeout).await?;
        Ok(context.mood_summary())
    }
}
