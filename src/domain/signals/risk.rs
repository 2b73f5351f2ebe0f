//! Risk levels and assessments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Three-point heuristic classification of crisis severity in a turn.
///
/// Ordered so that `max` always picks the safer (higher) reading.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    None,
    Elevated,
    High,
}

impl RiskLevel {
    pub fn is_high(&self) -> bool {
        matches!(self, RiskLevel::High)
    }

    /// Returns true for any level above `None`.
    pub fn warrants_resources(&self) -> bool {
        !matches!(self, RiskLevel::None)
    }
}

/// Output of a risk detector for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Curated lexicon phrases that matched; never raw user text.
    pub matched_triggers: BTreeSet<String>,
}

impl RiskAssessment {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(level: RiskLevel, matched_triggers: BTreeSet<String>) -> Self {
        Self {
            level,
            matched_triggers,
        }
    }

    /// Assessment used when the detector could not run.
    ///
    /// Degrades to `Elevated` so a failure never reads as "no risk".
    pub fn degraded() -> Self {
        Self {
            level: RiskLevel::Elevated,
            matched_triggers: BTreeSet::new(),
        }
    }

    /// Merges two assessments, keeping the higher level and all triggers.
    pub fn merge(mut self, other: RiskAssessment) -> Self {
        self.level = self.level.max(other.level);
        self.matched_triggers.extend(other.matched_triggers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(RiskLevel::None < RiskLevel::Elevated);
        assert!(RiskLevel::Elevated < RiskLevel::High);
    }

    #[test]
    fn degraded_assessment_is_elevated() {
        assert_eq!(RiskAssessment::degraded().level, RiskLevel::Elevated);
    }

    #[test]
    fn merge_keeps_higher_level_and_all_triggers() {
        let a = RiskAssessment::new(RiskLevel::Elevated, BTreeSet::from(["hopeless".to_string()]));
        let b = RiskAssessment::new(RiskLevel::High, BTreeSet::from(["kill myself".to_string()]));
        let merged = a.merge(b);
        assert_eq!(merged.level, RiskLevel::High);
        assert_eq!(merged.matched_triggers.len(), 2);
    }

    #[test]
    fn only_none_skips_resources() {
        assert!(!RiskLevel::None.warrants_resources());
        assert!(RiskLevel::Elevated.warrants_resources());
        assert!(RiskLevel::High.warrants_resources());
    }
}
