//! Lexicon-based sentiment scorer.
//!
//! Sums word polarities, flips the polarity of negated words, boosts words
//! that follow an intensifier, and divides by the number of words. The
//! result is clipped to [-1, 1].

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::lexicon::Token;
use crate::ports::{ExtractorError, SentimentScorer};

/// Multiplier applied to a word directly after an intensifier.
const INTENSIFIER_BOOST: f32 = 1.5;

static POLARITY: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        // positive
        ("good", 0.5),
        ("great", 0.8),
        ("happy", 0.8),
        ("better", 0.5),
        ("calm", 0.4),
        ("calmer", 0.5),
        ("relaxed", 0.5),
        ("glad", 0.6),
        ("grateful", 0.7),
        ("thankful", 0.7),
        ("thanks", 0.4),
        ("thank", 0.4),
        ("love", 0.6),
        ("hopeful", 0.6),
        ("fine", 0.2),
        ("okay", 0.1),
        ("amazing", 0.9),
        ("wonderful", 0.9),
        ("excited", 0.7),
        ("proud", 0.7),
        ("safe", 0.4),
        ("peaceful", 0.6),
        ("nice", 0.4),
        ("rested", 0.5),
        // negative
        ("sad", -0.6),
        ("anxious", -0.6),
        ("anxiety", -0.5),
        ("worried", -0.5),
        ("nervous", -0.4),
        ("stressed", -0.5),
        ("overwhelmed", -0.7),
        ("depressed", -0.8),
        ("lonely", -0.6),
        ("angry", -0.6),
        ("upset", -0.6),
        ("frustrated", -0.5),
        ("terrible", -0.9),
        ("awful", -0.9),
        ("horrible", -0.9),
        ("miserable", -0.9),
        ("hopeless", -0.9),
        ("worthless", -0.9),
        ("tired", -0.3),
        ("exhausted", -0.5),
        ("scared", -0.6),
        ("afraid", -0.6),
        ("panic", -0.7),
        ("hate", -0.8),
        ("bad", -0.5),
        ("crying", -0.6),
        ("hurt", -0.6),
        ("pain", -0.6),
        ("empty", -0.6),
        ("numb", -0.5),
    ]
    .into_iter()
    .collect()
});

/// Polarity-lexicon scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores synchronously. Empty input scores 0.0.
    pub fn score_tokens(&self, tokens: &[Token]) -> f32 {
        let mut words = 0usize;
        let mut total = 0.0f32;
        let mut boost = 1.0f32;

        for token in tokens.iter().filter(|t| t.is_word()) {
            words += 1;
            if token.is_intensifier() {
                boost = INTENSIFIER_BOOST;
                continue;
            }
            if let Some(&polarity) = POLARITY.get(token.text()) {
                let signed = if token.is_negated() { -polarity } else { polarity };
                total += signed * boost;
            }
            boost = 1.0;
        }

        if words == 0 {
            return 0.0;
        }
        (total / words as f32).clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl SentimentScorer for LexiconSentimentScorer {
    async fn score(&self, tokens: &[Token]) -> Result<f32, ExtractorError> {
        Ok(self.score_tokens(tokens))
    }
}
