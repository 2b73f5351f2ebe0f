//! Rule-based intent classifier.
//!
//! Every intent owns a list of keyword and phrase patterns. A message scores
//! one point per pattern occurrence, minus one when the occurrence is
//! negated. A pattern covered by a longer matching pattern is not counted,
//! so "can't sleep" scores as a sleep complaint rather than a negated
//! mention of sleep. The best positive score wins; ties go to the intent
//! listed first in `Intent::PRIORITY`.

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::lexicon::{find_phrase, normalize_phrase, Token};
use crate::domain::signals::Intent;
use crate::ports::{ExtractorError, IntentClassifier};

const CRISIS_PATTERNS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "end it all",
    "hurt myself",
    "harm myself",
    "self harm",
    "want to die",
    "dont want to live",
    "no reason to live",
];

const ANXIETY_PATTERNS: &[&str] = &[
    "anxious",
    "anxiety",
    "panic",
    "panicking",
    "worried",
    "worrying",
    "nervous",
    "stressed",
    "stress",
    "overwhelmed",
    "on edge",
    "scared",
    "afraid",
    "racing thoughts",
    "cant calm down",
    "cant stop worrying",
];

const VENT_PATTERNS: &[&str] = &[
    "sad",
    "depressed",
    "lonely",
    "alone",
    "upset",
    "angry",
    "frustrated",
    "hopeless",
    "worthless",
    "empty",
    "crying",
    "heartbroken",
    "fed up",
    "bad day",
    "rough day",
    "awful day",
    "terrible day",
    "tired of",
    "vent",
    "hate",
];

const SLEEP_PATTERNS: &[&str] = &[
    "sleep",
    "sleeping",
    "insomnia",
    "nightmare",
    "nightmares",
    "awake",
    "tired",
    "exhausted",
    "cant sleep",
    "couldnt sleep",
    "trouble sleeping",
    "unable to sleep",
];

const MOOD_PATTERNS: &[&str] = &[
    "mood",
    "log mood",
    "log my mood",
    "track my mood",
    "rate my mood",
    "check in",
    "mood log",
];

const EXERCISE_PATTERNS: &[&str] = &[
    "exercise",
    "exercises",
    "breathing",
    "breathe",
    "breath",
    "grounding",
    "meditate",
    "meditation",
    "relax",
    "relaxation",
    "calm down",
    "box breathing",
];

const RESOURCE_PATTERNS: &[&str] = &[
    "resource",
    "resources",
    "crisis",
    "hotline",
    "helpline",
    "lifeline",
    "therapist",
    "counselor",
    "counsellor",
    "professional help",
    "article",
    "articles",
    "journal",
    "journaling",
    "phone number",
    "number to call",
];

const GREETING_PATTERNS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hiya",
    "howdy",
    "good morning",
    "good afternoon",
    "good evening",
];

struct CompiledPattern {
    intent: Intent,
    words: Vec<String>,
}

static PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| {
    let table: [(Intent, &[&str]); 8] = [
        (Intent::CrisisRisk, CRISIS_PATTERNS),
        (Intent::Anxiety, ANXIETY_PATTERNS),
        (Intent::Vent, VENT_PATTERNS),
        (Intent::Sleep, SLEEP_PATTERNS),
        (Intent::MoodLog, MOOD_PATTERNS),
        (Intent::ExerciseRequest, EXERCISE_PATTERNS),
        (Intent::ResourceRequest, RESOURCE_PATTERNS),
        (Intent::Greeting, GREETING_PATTERNS),
    ];
    table
        .iter()
        .flat_map(|(intent, patterns)| {
            patterns.iter().map(move |p| CompiledPattern {
                intent: *intent,
                words: normalize_phrase(p),
            })
        })
        .filter(|p| !p.words.is_empty())
        .collect()
});

#[derive(Debug, Clone, Copy)]
struct Hit {
    intent: Intent,
    start: usize,
    len: usize,
    weight: i32,
}

impl Hit {
    fn covered_by(&self, other: &Hit) -> bool {
        other.len > self.len
            && other.start <= self.start
            && self.start + self.len <= other.start + other.len
    }
}

/// Deterministic keyword/phrase classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedIntentClassifier;

impl RuleBasedIntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies synchronously. Never fails.
    pub fn classify_tokens(&self, tokens: &[Token]) -> Intent {
        if tokens.is_empty() {
            return Intent::Unknown;
        }

        let hits: Vec<Hit> = PATTERNS
            .iter()
            .flat_map(|pattern| {
                find_phrase(tokens, &pattern.words)
                    .into_iter()
                    .map(move |start| {
                        let first = &tokens[start];
                        // A pattern that opens with a negator carries its own negation
                        let weight = if first.is_negated() && !first.is_negator() {
                            -1
                        } else {
                            1
                        };
                        Hit {
                            intent: pattern.intent,
                            start,
                            len: pattern.words.len(),
                            weight,
                        }
                    })
            })
            .collect();

        let score = |intent: Intent| -> i32 {
            hits.iter()
                .filter(|hit| hit.intent == intent)
                .filter(|hit| !hits.iter().any(|other| hit.covered_by(other)))
                .map(|hit| hit.weight)
                .sum()
        };

        let mut best = Intent::Unknown;
        let mut best_score = 0;
        for intent in Intent::PRIORITY {
            let s = score(intent);
            if s > best_score {
                best = intent;
                best_score = s;
            }
        }
        best
    }
}

#[async_trait]
impl IntentClassifier for RuleBasedIntentClassifier {
    async fn classify(&self, tokens: &[Token]) -> Result<Intent, ExtractorError> {
        Ok(self.classify_tokens(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lexicon::LexicalAnalyzer;

    fn classify(text: &str) -> Intent {
        RuleBasedIntentClassifier::new().classify_tokens(&LexicalAnalyzer::new().normalize(text))
    }

    mod scenarios {
        use super::*;

        #[test]
        fn anxious_about_exams_is_anxiety() {
            assert_eq!(classify("I'm feeling really anxious about my exams"), Intent::Anxiety);
        }

        #[test]
        fn exercises_is_exercise_request() {
            assert_eq!(classify("exercises"), Intent::ExerciseRequest);
        }

        #[test]
        fn crisis_keyword_alone_is_resource_request() {
            assert_eq!(classify("crisis"), Intent::ResourceRequest);
        }

        #[test]
        fn empty_input_is_unknown() {
            assert_eq!(classify(""), Intent::Unknown);
            assert_eq!(classify("   "), Intent::Unknown);
        }
    }

    mod scoring {
        use super::*;

        #[test]
        fn greeting_words_are_recognized() {
            assert_eq!(classify("Hello there!"), Intent::Greeting);
        }

        #[test]
        fn cant_sleep_is_sleep() {
            assert_eq!(classify("I can't sleep at night"), Intent::Sleep);
        }

        #[test]
        fn negation_subtracts() {
            assert_eq!(classify("I'm not stressed"), Intent::Unknown);
        }

        #[test]
        fn more_matches_beat_priority() {
            // One anxiety hit against two resource hits
            assert_eq!(
                classify("worried, can you give me a therapist or a hotline"),
                Intent::ResourceRequest
            );
        }

        #[test]
        fn ties_follow_priority_order() {
            // Anxiety outranks sleep on a tie
            assert_eq!(classify("stressed and tired"), Intent::Anxiety);
        }

        #[test]
        fn mood_log_phrases() {
            assert_eq!(classify("log my mood: 4"), Intent::MoodLog);
        }

        #[test]
        fn unmatched_text_is_unknown() {
            assert_eq!(classify("the weather is mild"), Intent::Unknown);
        }
    }

    #[tokio::test]
    async fn async_contract_matches_sync() {
        let tokens = LexicalAnalyzer::new().normalize("hello");
        let classifier = RuleBasedIntentClassifier::new();
        assert_eq!(classifier.classify(&tokens).await.unwrap(), Intent::Greeting);
    }
}
