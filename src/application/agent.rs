//! SupportAgent - The entry points the UI collaborator calls.
//!
//! Wires the handlers to one set of adapters and exposes the session
//! lifecycle, message submission and mood queries. Any adapter can be
//! replaced through the builder; unset ones default to the rule-based
//! extractors, the embedded resource library, an in-memory store and
//! `tracing` diagnostics.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    IdleReaperConfig, IdleSessionReaper, InMemorySessionStore, LexiconSentimentScorer,
    PhraseRiskDetector, RuleBasedIntentClassifier, StaticResourceLibrary,
    TracingCrisisDiagnostics,
};
use crate::config::AppConfig;
use crate::domain::composer::ResponseComposer;
use crate::domain::dialogue::DialogueManager;
use crate::domain::foundation::SessionId;
use crate::domain::session::{
    MoodEntry, MoodSummary, SessionError, SessionLimits, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_MAX_MOOD_ENTRIES,
};
use crate::ports::{
    CrisisDiagnostics, IntentClassifier, ResourceError, ResourceLibrary, RiskDetector,
    SentimentScorer, SessionStore,
};

use super::handlers::{
    EndSessionHandler, GetMoodLogHandler, GetMoodSummaryHandler, StartSessionHandler,
    StartSessionResult, SubmitMessageCommand, SubmitMessageConfig, SubmitMessageHandler,
    SubmitMessageResult,
};
use super::signal_pipeline::{SignalPipeline, DEFAULT_EXTRACTOR_TIMEOUT};

/// Tunables for one agent instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSettings {
    pub history_capacity: usize,
    pub max_mood_entries: usize,
    pub max_input_chars: usize,
    pub extractor_timeout: Duration,
    pub idle_timeout: Duration,
    pub reap_interval: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_mood_entries: DEFAULT_MAX_MOOD_ENTRIES,
            max_input_chars: 2000,
            extractor_timeout: DEFAULT_EXTRACTOR_TIMEOUT,
            idle_timeout: Duration::from_secs(30 * 60),
            reap_interval: Duration::from_secs(60),
        }
    }
}

impl From<&AppConfig> for AgentSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            history_capacity: config.dialogue.history_capacity,
            max_mood_entries: config.session.max_mood_entries,
            max_input_chars: config.dialogue.max_input_chars,
            extractor_timeout: config.dialogue.extractor_timeout(),
            idle_timeout: config.session.idle_timeout(),
            reap_interval: config.session.reap_interval(),
        }
    }
}

/// Builder for [`SupportAgent`].
#[derive(Default)]
pub struct SupportAgentBuilder {
    settings: AgentSettings,
    intent: Option<Arc<dyn IntentClassifier>>,
    sentiment: Option<Arc<dyn SentimentScorer>>,
    risk: Option<Arc<dyn RiskDetector>>,
    library: Option<Arc<dyn ResourceLibrary>>,
    store: Option<Arc<dyn SessionStore>>,
    diagnostics: Option<Arc<dyn CrisisDiagnostics>>,
    manager: Option<DialogueManager>,
}

impl SupportAgentBuilder {
    pub fn settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn intent_classifier(mut self, intent: Arc<dyn IntentClassifier>) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn sentiment_scorer(mut self, sentiment: Arc<dyn SentimentScorer>) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn risk_detector(mut self, risk: Arc<dyn RiskDetector>) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn resource_library(mut self, library: Arc<dyn ResourceLibrary>) -> Self {
        self.library = Some(library);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn crisis_diagnostics(mut self, diagnostics: Arc<dyn CrisisDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn dialogue_manager(mut self, manager: DialogueManager) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Assembles the agent.
    ///
    /// # Errors
    /// Fails only when no library was given and the embedded one cannot be parsed.
    pub fn build(self) -> Result<SupportAgent, ResourceError> {
        let settings = self.settings;
        let library = match self.library {
            Some(library) => library,
            None => Arc::new(StaticResourceLibrary::embedded()?),
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingCrisisDiagnostics::new()));

        let pipeline = SignalPipeline::new(
            self.intent
                .unwrap_or_else(|| Arc::new(RuleBasedIntentClassifier::new())),
            self.sentiment
                .unwrap_or_else(|| Arc::new(LexiconSentimentScorer::new())),
            self.risk.unwrap_or_else(|| Arc::new(PhraseRiskDetector::new())),
            Arc::clone(&diagnostics),
        )
        .with_timeout(settings.extractor_timeout);

        let composer = ResponseComposer::new(library);
        let limits = SessionLimits {
            history_capacity: settings.history_capacity,
            max_mood_entries: settings.max_mood_entries,
        };

        let submit = SubmitMessageHandler::new(
            Arc::clone(&store),
            pipeline,
            composer.clone(),
            diagnostics,
            SubmitMessageConfig {
                max_input_chars: settings.max_input_chars,
                idle_timeout: settings.idle_timeout,
            },
        )
        .with_manager(self.manager.unwrap_or_default());

        Ok(SupportAgent {
            start: StartSessionHandler::new(Arc::clone(&store), composer, limits),
            submit,
            end: EndSessionHandler::new(Arc::clone(&store)),
            mood_log: GetMoodLogHandler::new(Arc::clone(&store), settings.idle_timeout),
            mood_summary: GetMoodSummaryHandler::new(Arc::clone(&store), settings.idle_timeout),
            store,
            settings,
        })
    }
}

/// Conversational support agent.
pub struct SupportAgent {
    start: StartSessionHandler,
    submit: SubmitMessageHandler,
    end: EndSessionHandler,
    mood_log: GetMoodLogHandler,
    mood_summary: GetMoodSummaryHandler,
    store: Arc<dyn SessionStore>,
    settings: AgentSettings,
}

impl SupportAgent {
    pub fn builder() -> SupportAgentBuilder {
        SupportAgentBuilder::default()
    }

    /// Builds an agent from loaded configuration, reading the library file if one is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, ResourceError> {
        let builder = Self::builder().settings(AgentSettings::from(config));
        let builder = match &config.resources.library_path {
            Some(path) => builder.resource_library(Arc::new(StaticResourceLibrary::from_file(path)?)),
            None => builder,
        };
        builder.build()
    }

    /// Opens a session and returns its id with a welcome message.
    pub async fn start_session(&self) -> Result<StartSessionResult, SessionError> {
        self.start.handle().await
    }

    /// Resolves one user turn.
    ///
    /// # Errors
    /// Fails only with `UnknownSession` (or a store failure); extractor
    /// problems degrade silently.
    pub async fn submit_message(
        &self,
        session_id: SessionId,
        raw_text: impl Into<String>,
    ) -> Result<SubmitMessageResult, SessionError> {
        self.submit
            .handle(SubmitMessageCommand {
                session_id,
                raw_text: raw_text.into(),
            })
            .await
    }

    /// Discards a session immediately. Idempotent.
    pub async fn end_session(&self, session_id: SessionId) -> Result<(), SessionError> {
        self.end.handle(session_id).await
    }

    /// Snapshot of the session's mood log, oldest first.
    pub async fn get_mood_log(&self, session_id: SessionId) -> Result<Vec<MoodEntry>, SessionError> {
        self.mood_log.handle(session_id).await
    }

    pub async fn get_mood_summary(&self, session_id: SessionId) -> Result<MoodSummary, SessionError> {
        self.mood_summary.handle(session_id).await
    }

    /// Background reaper over this agent's store.
    pub fn idle_reaper(&self) -> IdleSessionReaper {
        IdleSessionReaper::new(
            Arc::clone(&self.store),
            IdleReaperConfig::default()
                .with_idle_timeout(self.settings.idle_timeout)
                .with_sweep_interval(self.settings.reap_interval),
        )
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.count().await
    }

    pub fn settings(&self) -> AgentSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let mut config = AppConfig::default();
        config.dialogue.history_capacity = 4;
        config.session.idle_timeout_secs = 120;
        let settings = AgentSettings::from(&config);
        assert_eq!(settings.history_capacity, 4);
        assert_eq!(settings.idle_timeout, Duration::from_secs(120));
    }

    #[test]
    fn default_settings_match_default_config() {
        assert_eq!(
            AgentSettings::from(&AppConfig::default()),
            AgentSettings::default()
        );
    }

    #[tokio::test]
    async fn default_build_runs_a_turn() {
        let agent = SupportAgent::builder().build().unwrap();
        let started = agent.start_session().await.unwrap();
        let result = agent
            .submit_message(started.session_id, "hello")
            .await
            .unwrap();
        assert!(!result.response_text.is_empty());
        assert_eq!(agent.active_sessions().await, 1);
    }

    #[test]
    fn missing_library_file_fails_build() {
        let mut config = AppConfig::default();
        config.resources.library_path = Some("/nonexistent/library.yaml".into());
        assert!(matches!(
            SupportAgent::from_config(&config),
            Err(ResourceError::Io(_))
        ));
    }
}
