//! Dialogue configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_HISTORY_CAPACITY: usize = 100;
const MAX_INPUT_CHARS: usize = 20_000;
const MAX_EXTRACTOR_TIMEOUT_MS: u64 = 10_000;

/// Per-turn processing limits
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Turns kept in each session's history (K)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Characters of a message processed before truncation
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Upper bound on each signal extractor call
    #[serde(default = "default_extractor_timeout_ms")]
    pub extractor_timeout_ms: u64,
}

impl DialogueConfig {
    pub fn extractor_timeout(&self) -> Duration {
        Duration::from_millis(self.extractor_timeout_ms)
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ValidationError::InvalidHistoryCapacity {
                max: MAX_HISTORY_CAPACITY,
            });
        }
        if self.max_input_chars == 0 || self.max_input_chars > MAX_INPUT_CHARS {
            return Err(ValidationError::InvalidMaxInputChars {
                max: MAX_INPUT_CHARS,
            });
        }
        if self.extractor_timeout_ms == 0 || self.extractor_timeout_ms > MAX_EXTRACTOR_TIMEOUT_MS {
            return Err(ValidationError::InvalidExtractorTimeout {
                max: MAX_EXTRACTOR_TIMEOUT_MS,
            });
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            max_input_chars: default_max_input_chars(),
            extractor_timeout_ms: default_extractor_timeout_ms(),
        }
    }
}

fn default_history_capacity() -> usize {
    10
}

fn default_max_input_chars() -> usize {
    2000
}

fn default_extractor_timeout_ms() -> u64 {
    250
}
