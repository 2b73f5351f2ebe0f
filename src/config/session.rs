//! Session lifetime configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;
const MAX_MOOD_ENTRIES: usize = 10_000;

/// Session lifetime and mood log bounds
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Inactivity after which a session is discarded
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// How often the reaper looks for idle sessions
    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,

    /// Mood entries kept per session
    #[serde(default = "default_max_mood_entries")]
    pub max_mood_entries: usize,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_timeout_secs == 0 || self.idle_timeout_secs > MAX_IDLE_TIMEOUT_SECS {
            return Err(ValidationError::InvalidIdleTimeout {
                max: MAX_IDLE_TIMEOUT_SECS,
            });
        }
        if self.reap_interval_secs == 0 || self.reap_interval_secs > self.idle_timeout_secs {
            return Err(ValidationError::InvalidReapInterval);
        }
        if self.max_mood_entries == 0 || self.max_mood_entries > MAX_MOOD_ENTRIES {
            return Err(ValidationError::InvalidMoodCapacity {
                max: MAX_MOOD_ENTRIES,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            reap_interval_secs: default_reap_interval_secs(),
            max_mood_entries: default_max_mood_entries(),
        }
    }
}

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

fn default_reap_interval_secs() -> u64 {
    60
}

fn default_max_mood_entries() -> usize {
    500
}
