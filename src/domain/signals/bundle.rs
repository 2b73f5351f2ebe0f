//! Per-turn signal bundle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::intent::Intent;
use super::risk::{RiskAssessment, RiskLevel};

/// Identifies one of the three signal extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Intent,
    Sentiment,
    Risk,
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractorKind::Intent => "intent",
            ExtractorKind::Sentiment => "sentiment",
            ExtractorKind::Risk => "risk",
        };
        write!(f, "{}", s)
    }
}

/// Response tone derived from sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    StronglyNegative,
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Tone {
    /// Maps a sentiment score in [-1, 1] to a tone band.
    pub fn from_sentiment(score: f32) -> Self {
        if score <= -0.25 {
            Tone::StronglyNegative
        } else if score < -0.05 {
            Tone::Negative
        } else if score > 0.05 {
            Tone::Positive
        } else {
            Tone::Neutral
        }
    }
}

/// Everything the extractors concluded about one turn.
///
/// Built once per turn and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    intent: Intent,
    sentiment_score: f32,
    risk_level: RiskLevel,
    matched_triggers: BTreeSet<String>,
    degraded: Vec<ExtractorKind>,
}

impl SignalBundle {
    /// Creates a bundle, clamping sentiment into [-1, 1].
    pub fn new(intent: Intent, sentiment_score: f32, risk: RiskAssessment) -> Self {
        let sentiment_score = if sentiment_score.is_finite() {
            sentiment_score.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            intent,
            sentiment_score,
            risk_level: risk.level,
            matched_triggers: risk.matched_triggers,
            degraded: Vec::new(),
        }
    }

    /// Records which extractors fell back to their safe defaults.
    pub fn with_degraded(mut self, degraded: Vec<ExtractorKind>) -> Self {
        self.degraded = degraded;
        self
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn sentiment_score(&self) -> f32 {
        self.sentiment_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn matched_triggers(&self) -> &BTreeSet<String> {
        &self.matched_triggers
    }

    /// Extractors that failed or timed out for this turn.
    pub fn degraded(&self) -> &[ExtractorKind] {
        &self.degraded
    }

    pub fn tone(&self) -> Tone {
        Tone::from_sentiment(self.sentiment_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_sentiment_into_range() {
        let bundle = SignalBundle::new(Intent::Vent, -3.0, RiskAssessment::none());
        assert_eq!(bundle.sentiment_score(), -1.0);
        let bundle = SignalBundle::new(Intent::Vent, f32::NAN, RiskAssessment::none());
        assert_eq!(bundle.sentiment_score(), 0.0);
    }

    #[test]
    fn carries_risk_assessment() {
        let risk = RiskAssessment::new(
            RiskLevel::High,
            BTreeSet::from(["kill myself".to_string()]),
        );
        let bundle = SignalBundle::new(Intent::CrisisRisk, -0.8, risk);
        assert!(bundle.risk_level().is_high());
        assert!(bundle.matched_triggers().contains("kill myself"));
    }

    mod tone {
        use super::*;

        #[test]
        fn bands_cover_the_range() {
            assert_eq!(Tone::from_sentiment(-0.9), Tone::StronglyNegative);
            assert_eq!(Tone::from_sentiment(-0.1), Tone::Negative);
            assert_eq!(Tone::from_sentiment(0.0), Tone::Neutral);
            assert_eq!(Tone::from_sentiment(0.4), Tone::Positive);
        }
    }
}
