//! SignalPipeline - Runs the three signal extractors for one turn.
//!
//! The extractors run concurrently. Each call is bounded by a timeout and
//! isolated from panics; a failed, slow or panicking extractor is replaced
//! by its safe default:
//!
//! | Extractor | Default on failure |
//! |-----------|--------------------|
//! | intent    | `UNKNOWN`          |
//! | sentiment | `0.0`              |
//! | risk      | `ELEVATED`         |
//!
//! A risk detector failure is also reported on the crisis diagnostics
//! channel, since it is the one failure that could hide a crisis.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::SessionId;
use crate::domain::lexicon::Token;
use crate::domain::signals::{ExtractorKind, Intent, RiskAssessment, SignalBundle};
use crate::ports::{
    CrisisDiagnostic, CrisisDiagnostics, CrisisEvent, ExtractorError, IntentClassifier,
    RiskDetector, SentimentScorer,
};

/// Default bound on a single extractor call.
pub const DEFAULT_EXTRACTOR_TIMEOUT: Duration = Duration::from_millis(250);

/// Concurrent, bounded signal extraction.
#[derive(Clone)]
pub struct SignalPipeline {
    intent: Arc<dyn IntentClassifier>,
    sentiment: Arc<dyn SentimentScorer>,
    risk: Arc<dyn RiskDetector>,
    diagnostics: Arc<dyn CrisisDiagnostics>,
    timeout: Duration,
}

impl SignalPipeline {
    pub fn new(
        intent: Arc<dyn IntentClassifier>,
        sentiment: Arc<dyn SentimentScorer>,
        risk: Arc<dyn RiskDetector>,
        diagnostics: Arc<dyn CrisisDiagnostics>,
    ) -> Self {
        Self {
            intent,
            sentiment,
            risk,
            diagnostics,
            timeout: DEFAULT_EXTRACTOR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extracts all signals for a turn. Never fails.
    ///
    /// `tokens` come from the text kept for processing; `raw` is the full
    /// message and is only given to the risk detector.
    pub async fn extract(&self, session_id: SessionId, tokens: &[Token], raw: &str) -> SignalBundle {
        let (intent, sentiment, risk) = tokio::join!(
            bounded(self.timeout, self.intent.classify(tokens)),
            bounded(self.timeout, self.sentiment.score(tokens)),
            bounded(self.timeout, self.risk.detect(tokens, raw)),
        );

        let mut degraded = Vec::new();

        let intent = intent.unwrap_or_else(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "intent classifier failed; using UNKNOWN");
            degraded.push(ExtractorKind::Intent);
            Intent::Unknown
        });

        let sentiment = sentiment.unwrap_or_else(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "sentiment scorer failed; using neutral");
            degraded.push(ExtractorKind::Sentiment);
            0.0
        });

        let risk = match risk {
            Ok(assessment) => assessment,
            Err(err) => {
                self.diagnostics.report(CrisisDiagnostic::new(
                    session_id,
                    CrisisEvent::RiskDetectorFailed {
                        reason: err.to_string(),
                    },
                ));
                degraded.push(ExtractorKind::Risk);
                RiskAssessment::degraded()
            }
        };

        SignalBundle::new(intent, sentiment, risk).with_degraded(degraded)
    }
}

/// Runs an extractor call under a timeout, turning panics into errors.
async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, ExtractorError>
where
    F: Future<Output = Result<T, ExtractorError>>,
{
    match tokio::time::timeout(timeout, AssertUnwindSafe(call).catch_unwind()).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(ExtractorError::Panicked),
        Err(_) => Err(ExtractorError::TimedOut(timeout.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryCrisisDiagnostics, LexiconSentimentScorer, PhraseRiskDetector,
        RuleBasedIntentClassifier,
    };
    use crate::domain::lexicon::LexicalAnalyzer;
    use crate::domain::signals::RiskLevel;
    use async_trait::async_trait;

    struct FailingRisk;

    #[async_trait]
    impl RiskDetector for FailingRisk {
        async fn detect(&self, _: &[Token], _: &str) -> Result<RiskAssessment, ExtractorError> {
            Err(ExtractorError::internal("lexicon unavailable"))
        }
    }

    struct SlowIntent;

    #[async_trait]
    impl IntentClassifier for SlowIntent {
        async fn classify(&self, _: &[Token]) -> Result<Intent, ExtractorError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Intent::Greeting)
        }
    }

    struct PanickingSentiment;

    #[async_trait]
    impl SentimentScorer for PanickingSentiment {
        async fn score(&self, _: &[Token]) -> Result<f32, ExtractorError> {
            panic!("scorer bug")
        }
    }

    fn pipeline(
        intent: Arc<dyn IntentClassifier>,
        sentiment: Arc<dyn SentimentScorer>,
        risk: Arc<dyn RiskDetector>,
        diagnostics: &InMemoryCrisisDiagnostics,
    ) -> SignalPipeline {
        SignalPipeline::new(intent, sentiment, risk, Arc::new(diagnostics.clone()))
            .with_timeout(Duration::from_millis(50))
    }

    fn tokens(text: &str) -> Vec<Token> {
        LexicalAnalyzer::new().normalize(text)
    }

    #[tokio::test]
    async fn healthy_extractors_produce_full_bundle() {
        let diagnostics = InMemoryCrisisDiagnostics::new();
        let pipeline = pipeline(
            Arc::new(RuleBasedIntentClassifier::new()),
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(PhraseRiskDetector::new()),
            &diagnostics,
        );
        let text = "I'm feeling really anxious about my exams";
        let bundle = pipeline.extract(SessionId::new(), &tokens(text), text).await;

        assert_eq!(bundle.intent(), Intent::Anxiety);
        assert_eq!(bundle.risk_level(), RiskLevel::None);
        assert!(bundle.sentiment_score() < 0.0);
        assert!(bundle.degraded().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn risk_failure_degrades_to_elevated_and_reports() {
        let diagnostics = InMemoryCrisisDiagnostics::new();
        let pipeline = pipeline(
            Arc::new(RuleBasedIntentClassifier::new()),
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(FailingRisk),
            &diagnostics,
        );
        let bundle = pipeline.extract(SessionId::new(), &tokens("hello"), "hello").await;

        assert_eq!(bundle.risk_level(), RiskLevel::Elevated);
        assert_eq!(bundle.degraded(), &[ExtractorKind::Risk]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn slow_intent_times_out_to_unknown() {
        let diagnostics = InMemoryCrisisDiagnostics::new();
        let pipeline = pipeline(
            Arc::new(SlowIntent),
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(PhraseRiskDetector::new()),
            &diagnostics,
        );
        let bundle = pipeline.extract(SessionId::new(), &tokens("hi"), "hi").await;

        assert_eq!(bundle.intent(), Intent::Unknown);
        assert_eq!(bundle.degraded(), &[ExtractorKind::Intent]);
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn panicking_scorer_is_contained() {
        let diagnostics = InMemoryCrisisDiagnostics::new();
        let pipeline = pipeline(
            Arc::new(RuleBasedIntentClassifier::new()),
            Arc::new(PanickingSentiment),
            Arc::new(PhraseRiskDetector::new()),
            &diagnostics,
        );
        let text = "I want to kill myself";
        let bundle = pipeline.extract(SessionId::new(), &tokens(text), text).await;

        assert_eq!(bundle.sentiment_score(), 0.0);
        assert_eq!(bundle.risk_level(), RiskLevel::High);
        assert_eq!(bundle.degraded(), &[ExtractorKind::Sentiment]);
    }

    #[tokio::test]
    async fn risk_sees_text_beyond_tokens() {
        let diagnostics = InMemoryCrisisDiagnostics::new();
        let pipeline = pipeline(
            Arc::new(RuleBasedIntentClassifier::new()),
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(PhraseRiskDetector::new()),
            &diagnostics,
        );
        let bundle = pipeline
            .extract(SessionId::new(), &tokens("so"), "so ... I want to end my life")
            .await;
        assert_eq!(bundle.risk_level(), RiskLevel::High);
    }
}
