//! Session Store Port - Interface for holding live session contexts.
//!
//! Contexts are ephemeral and never leave process memory. Each context sits
//! behind its own async mutex, so turns for one session run strictly in
//! order while different sessions proceed in parallel.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionContext, SessionError};

/// Shared, lockable handle to one session's context.
pub type SessionHandle = Arc<Mutex<SessionContext>>;

/// Port for storing and retrieving session contexts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a new context and returns its handle.
    async fn insert(&self, context: SessionContext) -> Result<SessionHandle, SessionError>;

    /// Returns the handle for a live session.
    ///
    /// # Errors
    /// Returns `SessionError::UnknownSession` if the id is not held.
    async fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionError>;

    /// Drops a session. Returns true if it was present.
    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError>;

    /// Drops every session idle longer than `idle_timeout` and returns their ids.
    ///
    /// Sessions whose context is locked (a turn in flight) are skipped.
    async fn purge_idle(
        &self,
        idle_timeout: Duration,
        now: Timestamp,
    ) -> Result<Vec<SessionId>, SessionError>;

    /// Number of live sessions.
    async fn count(&self) -> usize;
}
