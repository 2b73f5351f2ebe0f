//! Mood log entries and session-scoped mood analytics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::lexicon::Token;

/// Words that mark the number after them as a mood rating.
const RATING_CUES: &[&str] = &[
    "mood", "rate", "rating", "score", "feel", "feeling", "im", "am", "at", "a", "its", "about",
    "say",
];

/// Five-point mood scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Awful,
    Low,
    Okay,
    Good,
    Great,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Awful,
        MoodLabel::Low,
        MoodLabel::Okay,
        MoodLabel::Good,
        MoodLabel::Great,
    ];

    /// Numeric score from 1 (awful) to 5 (great).
    pub fn score(&self) -> u8 {
        match self {
            MoodLabel::Awful => 1,
            MoodLabel::Low => 2,
            MoodLabel::Okay => 3,
            MoodLabel::Good => 4,
            MoodLabel::Great => 5,
        }
    }

    pub fn from_score(score: u8) -> Result<Self, ValidationError> {
        match score {
            1 => Ok(MoodLabel::Awful),
            2 => Ok(MoodLabel::Low),
            3 => Ok(MoodLabel::Okay),
            4 => Ok(MoodLabel::Good),
            5 => Ok(MoodLabel::Great),
            other => Err(ValidationError::out_of_range("mood_score", 1, 5, other as i32)),
        }
    }

    /// Reads the mood value carried by a message, if any.
    ///
    /// A mood word wins over a number. A negated word is pulled toward the
    /// middle of the scale ("not great" reads as low, "not bad" as okay).
    /// A number from 1 to 5 counts only when it reads as a rating: the whole
    /// reply, "3/5", "3 out of 5", or right after a cue such as "mood 4".
    pub fn parse(tokens: &[Token]) -> Option<Self> {
        let words: Vec<&Token> = tokens.iter().filter(|t| t.is_word()).collect();
        Self::parse_word(&words).or_else(|| Self::parse_rating(&words))
    }

    fn parse_word(words: &[&Token]) -> Option<Self> {
        words.iter().find_map(|token| {
            let label = Self::from_word(token.text())?;
            Some(if token.is_negated() {
                label.negated()
            } else {
                label
            })
        })
    }

    fn parse_rating(words: &[&Token]) -> Option<Self> {
        let text_at = |idx: usize| words.get(idx).map(|t| t.text());
        words.iter().enumerate().find_map(|(idx, token)| {
            let score = token.text().parse::<u8>().ok()?;
            let is_rating = words.len() == 1
                || text_at(idx + 1) == Some("5")
                || (text_at(idx + 1) == Some("out") && text_at(idx + 2) == Some("of"))
                || idx
                    .checked_sub(1)
                    .and_then(|prev| text_at(prev))
                    .map_or(false, |prev| RATING_CUES.contains(&prev));
            if is_rating {
                Self::from_score(score).ok()
            } else {
                None
            }
        })
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "awful" | "terrible" | "horrible" | "miserable" | "dreadful" => Some(MoodLabel::Awful),
            "bad" | "low" | "down" | "sad" | "rough" => Some(MoodLabel::Low),
            "okay" | "ok" | "fine" | "alright" | "meh" | "average" => Some(MoodLabel::Okay),
            "good" | "well" | "decent" | "nice" => Some(MoodLabel::Good),
            "great" | "amazing" | "fantastic" | "excellent" | "wonderful" | "awesome" => {
                Some(MoodLabel::Great)
            }
            _ => None,
        }
    }

    fn negated(self) -> Self {
        match self {
            MoodLabel::Great | MoodLabel::Good | MoodLabel::Okay => MoodLabel::Low,
            MoodLabel::Low | MoodLabel::Awful => MoodLabel::Okay,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoodLabel::Awful => "awful",
            MoodLabel::Low => "low",
            MoodLabel::Okay => "okay",
            MoodLabel::Good => "good",
            MoodLabel::Great => "great",
        };
        write!(f, "{}", s)
    }
}

/// One mood log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub timestamp: Timestamp,
    pub mood_label: MoodLabel,
}

impl MoodEntry {
    pub fn new(mood_label: MoodLabel) -> Self {
        Self {
            timestamp: Timestamp::now(),
            mood_label,
        }
    }
}

/// Direction of mood over the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    NoData,
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoodTrend::NoData => "no_data",
            MoodTrend::Improving => "improving",
            MoodTrend::Stable => "stable",
            MoodTrend::Declining => "declining",
        };
        write!(f, "{}", s)
    }
}

/// Difference in mean score that counts as a real change.
const TREND_THRESHOLD: f64 = 0.5;

/// Aggregate view over a session's mood log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub average_score: f64,
    pub trend: MoodTrend,
    pub total_entries: usize,
    pub latest: Option<MoodLabel>,
    /// Entries per label; every label is present, unused ones with 0.
    pub distribution: BTreeMap<MoodLabel, usize>,
}

impl MoodSummary {
    /// Summarizes entries given oldest first.
    ///
    /// The trend compares the newer half of the log against the older half.
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let mut distribution: BTreeMap<MoodLabel, usize> =
            MoodLabel::ALL.iter().map(|label| (*label, 0)).collect();
        for entry in entries {
            *distribution.entry(entry.mood_label).or_default() += 1;
        }

        if entries.is_empty() {
            return Self {
                average_score: 0.0,
                trend: MoodTrend::NoData,
                total_entries: 0,
                latest: None,
                distribution,
            };
        }

        let average = mean(entries);
        let trend = if entries.len() < 2 {
            MoodTrend::Stable
        } else {
            let (older, recent) = entries.split_at(entries.len() / 2);
            let delta = mean(recent) - mean(older);
            if delta > TREND_THRESHOLD {
                MoodTrend::Improving
            } else if delta < -TREND_THRESHOLD {
                MoodTrend::Declining
            } else {
                MoodTrend::Stable
            }
        };

        Self {
            average_score: (average * 100.0).round() / 100.0,
            trend,
            total_entries: entries.len(),
            latest: entries.last().map(|e| e.mood_label),
            distribution,
        }
    }
}

fn mean(entries: &[MoodEntry]) -> f64 {
    let total: u32 = entries.iter().map(|e| e.mood_label.score() as u32).sum();
    total as f64 / entries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lexicon::LexicalAnalyzer;

    fn parse(text: &str) -> Option<MoodLabel> {
        MoodLabel::parse(&LexicalAnalyzer::new().normalize(text))
    }

    fn entries(scores: &[u8]) -> Vec<MoodEntry> {
        scores
            .iter()
            .map(|s| MoodEntry::new(MoodLabel::from_score(*s).unwrap()))
            .collect()
    }

    mod label {
        use super::*;

        #[test]
        fn score_round_trips_for_whole_scale() {
            for score in 1..=5 {
                assert_eq!(MoodLabel::from_score(score).unwrap().score(), score);
            }
        }

        #[test]
        fn rejects_scores_outside_scale() {
            assert!(MoodLabel::from_score(0).is_err());
            assert!(MoodLabel::from_score(6).is_err());
        }

        #[test]
        fn parses_digits() {
            assert_eq!(parse("log my mood 4"), Some(MoodLabel::Good));
            assert_eq!(parse("3/5 today"), Some(MoodLabel::Okay));
        }

        #[test]
        fn parses_words() {
            assert_eq!(parse("feeling great"), Some(MoodLabel::Great));
            assert_eq!(parse("pretty awful honestly"), Some(MoodLabel::Awful));
        }

        #[test]
        fn negation_pulls_toward_middle() {
            assert_eq!(parse("not great"), Some(MoodLabel::Low));
            assert_eq!(parse("not bad"), Some(MoodLabel::Okay));
        }

        #[test]
        fn mood_word_beats_unrelated_number() {
            assert_eq!(
                parse("I only slept 2 hours and I feel great"),
                Some(MoodLabel::Great)
            );
        }

        #[test]
        fn number_outside_a_rating_is_ignored() {
            assert_eq!(parse("I only slept 2 hours"), None);
            assert_eq!(parse("4 out of 5"), Some(MoodLabel::Good));
            assert_eq!(parse("rate 5"), Some(MoodLabel::Great));
            assert_eq!(parse("2"), Some(MoodLabel::Low));
        }

        #[test]
        fn none_without_mood_value() {
            assert_eq!(parse("log my mood"), None);
            assert_eq!(parse(""), None);
        }
    }

    mod summary {
        use super::*;

        #[test]
        fn empty_log_has_no_data() {
            let summary = MoodSummary::from_entries(&[]);
            assert_eq!(summary.trend, MoodTrend::NoData);
            assert_eq!(summary.total_entries, 0);
            assert_eq!(summary.latest, None);
        }

        #[test]
        fn single_entry_is_stable() {
            let summary = MoodSummary::from_entries(&entries(&[4]));
            assert_eq!(summary.trend, MoodTrend::Stable);
            assert_eq!(summary.average_score, 4.0);
        }

        #[test]
        fn rising_scores_improve() {
            let summary = MoodSummary::from_entries(&entries(&[1, 2, 4, 5]));
            assert_eq!(summary.trend, MoodTrend::Improving);
            assert_eq!(summary.latest, Some(MoodLabel::Great));
        }

        #[test]
        fn falling_scores_decline() {
            let summary = MoodSummary::from_entries(&entries(&[5, 4, 2, 1]));
            assert_eq!(summary.trend, MoodTrend::Declining);
        }

        #[test]
        fn small_changes_are_stable() {
            let summary = MoodSummary::from_entries(&entries(&[3, 3, 3, 4]));
            assert_eq!(summary.trend, MoodTrend::Stable);
        }

        #[test]
        fn average_is_rounded_to_two_places() {
            let summary = MoodSummary::from_entries(&entries(&[1, 2, 2]));
            assert_eq!(summary.average_score, 1.67);
        }

        #[test]
        fn distribution_counts_each_label() {
            let summary = MoodSummary::from_entries(&entries(&[2, 4, 2, 5, 2]));
            let counts: Vec<usize> = summary.distribution.values().copied().collect();
            assert_eq!(counts, vec![0, 3, 0, 1, 1]);
            assert_eq!(summary.distribution[&MoodLabel::Low], 3);
        }

        #[test]
        fn empty_log_has_zeroed_distribution() {
            let summary = MoodSummary::from_entries(&[]);
            assert_eq!(summary.distribution.len(), 5);
            assert!(summary.distribution.values().all(|count| *count == 0));
        }

        #[test]
        fn distribution_serializes_by_label_name() {
            let summary = MoodSummary::from_entries(&entries(&[3]));
            let json = serde_json::to_value(&summary).unwrap();
            assert_eq!(json["distribution"]["okay"], 1);
            assert_eq!(json["distribution"]["great"], 0);
        }
    }
}
