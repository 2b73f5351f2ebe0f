//! IdleSessionReaper - Background service that expires idle sessions.
//!
//! A session that has seen no turn for longer than the idle timeout is
//! dropped from the store, discarding its context and mood log. Requests
//! that race the reaper still fail with `UnknownSession` once the session
//! is gone, since the submit handler checks idleness on its own.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `idle_timeout` | 30 min | Inactivity after which a session expires |
//! | `sweep_interval` | 60 s | How often to look for idle sessions |
//!
//! ## Graceful Shutdown
//!
//! The reaper listens on a watch channel and runs one final sweep before
//! stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::Timestamp;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

/// Configuration for the IdleSessionReaper service.
#[derive(Debug, Clone)]
pub struct IdleReaperConfig {
    /// Inactivity after which a session is dropped.
    pub idle_timeout: Duration,

    /// How often to sweep.
    pub sweep_interval: Duration,
}

impl Default for IdleReaperConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl IdleReaperConfig {
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Background service that purges idle sessions.
pub struct IdleSessionReaper {
    store: Arc<dyn SessionStore>,
    config: IdleReaperConfig,
}

impl IdleSessionReaper {
    pub fn new(store: Arc<dyn SessionStore>, config: IdleReaperConfig) -> Self {
        Self { store, config }
    }

    /// Run the sweep loop until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), SessionError> {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        self.sweep().await?;
                        tracing::info!("idle session reaper stopped");
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.sweep().await?;
                }
            }
        }
    }

    /// Purge idle sessions once. Returns how many were dropped.
    pub async fn sweep(&self) -> Result<usize, SessionError> {
        self.sweep_at(Timestamp::now()).await
    }

    /// Purge sessions idle as of `now` (for testing).
    pub async fn sweep_at(&self, now: Timestamp) -> Result<usize, SessionError> {
        let purged = self.store.purge_idle(self.config.idle_timeout, now).await?;
        for id in &purged {
            tracing::info!(session_id = %id, "session expired after inactivity");
        }
        Ok(purged.len())
    }
}
