//! Phrase-based crisis risk detector.
//!
//! Matches a curated, versioned phrase list against the full raw message
//! (flattened with `normalize_for_matching`) as well as the processed
//! tokens. Negation is deliberately ignored: "I don't want to hurt myself
//! anymore" still rates HIGH. When both levels match, HIGH wins.
//!
//! This is a best-effort heuristic and does not catch every way a person
//! may express risk.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

use crate::domain::lexicon::{find_phrase, normalize_for_matching, normalize_phrase, Token};
use crate::domain::signals::{RiskAssessment, RiskLevel};
use crate::ports::{ExtractorError, RiskDetector};

/// Identifies the curated phrase lists below.
pub const RISK_LEXICON_VERSION: &str = "2026.1";

/// Direct self-harm or suicidal language.
const HIGH_RISK_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "suicide",
    "suicidal",
    "end my life",
    "ending my life",
    "end it all",
    "take my own life",
    "want to die",
    "wanna die",
    "wish i was dead",
    "wish i were dead",
    "better off dead",
    "hurt myself",
    "hurting myself",
    "harm myself",
    "harming myself",
    "self harm",
    "selfharm",
    "cut myself",
    "cutting myself",
    "overdose",
    "dont want to live",
    "dont want to be alive",
    "no reason to live",
    "not worth living",
];

/// Hopelessness and despair without a direct self-harm mention.
const ELEVATED_RISK_PHRASES: &[&str] = &[
    "hopeless",
    "hopelessness",
    "worthless",
    "no point",
    "pointless",
    "give up",
    "giving up",
    "cant go on",
    "cant take it anymore",
    "cant do this anymore",
    "nothing matters",
    "no way out",
    "trapped",
    "a burden",
    "empty inside",
    "disappear",
    "dark thoughts",
    "die",
];

struct RiskPhrase {
    label: &'static str,
    words: Vec<String>,
    padded: String,
}

fn compile(phrases: &'static [&'static str]) -> Vec<RiskPhrase> {
    phrases
        .iter()
        .map(|&label| {
            let words = normalize_phrase(label);
            let padded = format!(" {} ", words.join(" "));
            RiskPhrase {
                label,
                words,
                padded,
            }
        })
        .filter(|p| !p.words.is_empty())
        .collect()
}

static HIGH: Lazy<Vec<RiskPhrase>> = Lazy::new(|| compile(HIGH_RISK_PHRASES));
static ELEVATED: Lazy<Vec<RiskPhrase>> = Lazy::new(|| compile(ELEVATED_RISK_PHRASES));

/// Curated-phrase risk detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseRiskDetector;

impl PhraseRiskDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn lexicon_version(&self) -> &'static str {
        RISK_LEXICON_VERSION
    }

    /// Assesses synchronously. Never fails.
    pub fn assess(&self, tokens: &[Token], raw: &str) -> RiskAssessment {
        let flattened = normalize_for_matching(raw);

        let high = matches(&HIGH, tokens, &flattened);
        if !high.is_empty() {
            return RiskAssessment::new(RiskLevel::High, high);
        }

        let elevated = matches(&ELEVATED, tokens, &flattened);
        if !elevated.is_empty() {
            return RiskAssessment::new(RiskLevel::Elevated, elevated);
        }

        RiskAssessment::none()
    }
}

fn matches(phrases: &[RiskPhrase], tokens: &[Token], flattened: &str) -> BTreeSet<String> {
    phrases
        .iter()
        .filter(|p| flattened.contains(&p.padded) || !find_phrase(tokens, &p.words).is_empty())
        .map(|p| p.label.to_string())
        .collect()
}

#[async_trait]
impl RiskDetector for PhraseRiskDetector {
    async fn detect(&self, tokens: &[Token], raw: &str) -> Result<RiskAssessment, ExtractorError> {
        Ok(self.assess(tokens, raw))
    }
}
