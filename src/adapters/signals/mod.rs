//! Rule-based signal extractors.
//!
//! Deterministic implementations of the signal ports. A statistical or
//! network-backed model can replace any of them behind the same trait.

mod intent_classifier;
mod risk_detector;
mod sentiment_scorer;

pub use intent_classifier::RuleBasedIntentClassifier;
pub use risk_detector::{PhraseRiskDetector, RISK_LEXICON_VERSION};
pub use sentiment_scorer::LexiconSentimentScorer;
