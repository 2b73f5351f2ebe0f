//! Shared lookup for operations on a live session.

use std::time::Duration;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionContext, SessionError};
use crate::ports::SessionStore;

/// Locks a session's context, treating ended or idle-expired sessions as unknown.
///
/// The lock is taken before the liveness checks so that a session ended
/// while a caller waited is not resurrected. An idle session found here is
/// discarded on the spot.
pub(crate) async fn lock_live_session(
    store: &dyn SessionStore,
    session_id: &SessionId,
    idle_timeout: Duration,
) -> Result<OwnedMutexGuard<SessionContext>, SessionError> {
    let handle = store.get(session_id).await?;
    let context = handle.lock_owned().await;

    // Ended while we waited for the lock
    store.get(session_id).await?;

    if context.is_idle(idle_timeout, &Timestamp::now()) {
        drop(context);
        store.remove(session_id).await?;
        tracing::info!(session_id = %session_id, "session expired after inactivity");
        return Err(SessionError::unknown(*session_id));
    }

    Ok(context)
}
