//! Intent enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse-grained purpose of a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Greeting,
    Vent,
    Anxiety,
    CrisisRisk,
    Sleep,
    ExerciseRequest,
    MoodLog,
    ResourceRequest,
    #[default]
    Unknown,
}

impl Intent {
    /// Tie-break order, highest priority first.
    ///
    /// `CrisisRisk` leads so that an equal score between a crisis pattern and
    /// any other intent always resolves toward the crisis reading.
    pub const PRIORITY: [Intent; 8] = [
        Intent::CrisisRisk,
        Intent::Anxiety,
        Intent::Vent,
        Intent::Sleep,
        Intent::MoodLog,
        Intent::ExerciseRequest,
        Intent::ResourceRequest,
        Intent::Greeting,
    ];

    /// Position in the tie-break order; lower wins. `Unknown` is last.
    pub fn priority_rank(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|i| i == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Greeting => "GREETING",
            Intent::Vent => "VENT",
            Intent::Anxiety => "ANXIETY",
            Intent::CrisisRisk => "CRISIS_RISK",
            Intent::Sleep => "SLEEP",
            Intent::ExerciseRequest => "EXERCISE_REQUEST",
            Intent::MoodLog => "MOOD_LOG",
            Intent::ResourceRequest => "RESOURCE_REQUEST",
            Intent::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(Intent::default(), Intent::Unknown);
    }

    #[test]
    fn crisis_risk_outranks_everything() {
        for intent in Intent::PRIORITY.iter().skip(1) {
            assert!(Intent::CrisisRisk.priority_rank() < intent.priority_rank());
        }
    }

    #[test]
    fn unknown_ranks_last() {
        assert_eq!(Intent::Unknown.priority_rank(), Intent::PRIORITY.len());
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&Intent::ExerciseRequest).unwrap();
        assert_eq!(json, "\"EXERCISE_REQUEST\"");
        assert_eq!(Intent::ExerciseRequest.to_string(), "EXERCISE_REQUEST");
    }
}
