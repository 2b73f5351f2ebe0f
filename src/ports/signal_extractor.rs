//! Signal Extractor Ports - Interfaces for per-turn signal extraction.
//!
//! Three independent extractors read the same normalized tokens. Each may
//! fail or stall; the signal pipeline bounds them with a timeout and
//! substitutes safe defaults, so implementations only need to return
//! their best reading or an error.

use async_trait::async_trait;

use crate::domain::foundation::ErrorCode;
use crate::domain::lexicon::Token;
use crate::domain::signals::{Intent, RiskAssessment};

/// Errors an extractor may report for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractorError {
    #[error("Extractor failed: {0}")]
    Internal(String),

    #[error("Extractor timed out after {0} ms")]
    TimedOut(u64),

    #[error("Extractor panicked")]
    Panicked,
}

impl ExtractorError {
    pub fn internal(message: impl Into<String>) -> Self {
        ExtractorError::Internal(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::ExtractorFailure
    }
}

/// Port for classifying the primary intent of a turn.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Returns exactly one intent; `Intent::Unknown` when nothing matches.
    async fn classify(&self, tokens: &[Token]) -> Result<Intent, ExtractorError>;
}

/// Port for scoring the sentiment of a turn.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Returns a score in [-1.0, 1.0]; 0.0 for empty input.
    async fn score(&self, tokens: &[Token]) -> Result<f32, ExtractorError>;
}

/// Port for detecting crisis risk in a turn.
///
/// Receives the full raw message as well as the tokens, since risk must be
/// judged on everything the user wrote, not only the part kept for
/// processing.
#[async_trait]
pub trait RiskDetector: Send + Sync {
    async fn detect(&self, tokens: &[Token], raw: &str) -> Result<RiskAssessment, ExtractorError>;
}
