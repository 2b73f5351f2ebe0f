//! SubmitMessageHandler - Command handler for one user turn.
//!
//! A turn is resolved completely (signals, transition, composition) while
//! the session's lock is held, so turns of one session never interleave.
//! Different sessions only share the store's map lock for the lookup.
//!
//! Input longer than the configured limit is cut on a character boundary
//! before analysis; the risk detector still sees the whole message.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::session::lock_live_session;
use crate::application::SignalPipeline;
use crate::domain::composer::ResponseComposer;
use crate::domain::dialogue::{DialogueManager, DialogueState, StrategyDirective, StrategyKind, TurnInput};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::lexicon::LexicalAnalyzer;
use crate::domain::resources::ResourceCategory;
use crate::domain::session::SessionError;
use crate::domain::signals::RiskLevel;
use crate::ports::{CrisisDiagnostic, CrisisDiagnostics, CrisisEvent, SessionStore};

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub session_id: SessionId,
    pub raw_text: String,
}

/// Outcome of a resolved turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitMessageResult {
    pub response_text: String,
    pub directive: StrategyDirective,
    /// Dialogue state after the turn.
    pub state: DialogueState,
    pub risk_level: RiskLevel,
    pub risk_escalated: bool,
    pub input_truncated: bool,
}

impl SubmitMessageResult {
    /// Code for a non-fatal input problem the UI may flag next to the reply.
    pub fn notice(&self) -> Option<ErrorCode> {
        self.input_truncated.then_some(ErrorCode::InputTooLong)
    }
}

/// Limits applied to each turn.
#[derive(Debug, Clone, Copy)]
pub struct SubmitMessageConfig {
    pub max_input_chars: usize,
    pub idle_timeout: Duration,
}

impl Default for SubmitMessageConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 2000,
            idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Handler for user turns.
pub struct SubmitMessageHandler {
    store: Arc<dyn SessionStore>,
    pipeline: SignalPipeline,
    manager: DialogueManager,
    composer: ResponseComposer,
    analyzer: LexicalAnalyzer,
    diagnostics: Arc<dyn CrisisDiagnostics>,
    config: SubmitMessageConfig,
}

impl SubmitMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        pipeline: SignalPipeline,
        composer: ResponseComposer,
        diagnostics: Arc<dyn CrisisDiagnostics>,
        config: SubmitMessageConfig,
    ) -> Self {
        Self {
            store,
            pipeline,
            manager: DialogueManager::new(),
            composer,
            analyzer: LexicalAnalyzer::new(),
            diagnostics,
            config,
        }
    }

    pub fn with_manager(mut self, manager: DialogueManager) -> Self {
        self.manager = manager;
        self
    }

    pub async fn handle(&self, cmd: SubmitMessageCommand) -> Result<SubmitMessageResult, SessionError> {
        let session_id = cmd.session_id;
        let mut context =
            lock_live_session(self.store.as_ref(), &session_id, self.config.idle_timeout).await?;

        let (text, truncated) = truncate_chars(&cmd.raw_text, self.config.max_input_chars);
        if truncated {
            tracing::debug!(
                session_id = %session_id,
                limit = self.config.max_input_chars,
                code = %ErrorCode::InputTooLong,
                "message truncated"
            );
        }

        let tokens = self.analyzer.normalize(text);
        let signals = self.pipeline.extract(session_id, &tokens, &cmd.raw_text).await;
        let triggers = signals.matched_triggers().clone();
        let risk_level = signals.risk_level();
        let was_in_crisis = context.state().is_crisis();

        let turn = TurnInput {
            text,
            tokens: &tokens,
            truncated,
        };
        let directive = self.manager.decide(&mut context, &turn, signals);

        if directive.kind() == StrategyKind::CrisisResponse && !was_in_crisis {
            self.diagnostics.report(CrisisDiagnostic::new(
                session_id,
                CrisisEvent::CrisisEscalated {
                    matched_triggers: triggers,
                },
            ));
        }

        let reply = self.composer.compose(&directive, &context);
        if let Some((ResourceCategory::Crisis, err)) = &reply.unavailable_resource {
            self.diagnostics.report(CrisisDiagnostic::new(
                session_id,
                CrisisEvent::CrisisResourceUnavailable {
                    category: ResourceCategory::Crisis,
                    reason: err.to_string(),
                },
            ));
        }

        Ok(SubmitMessageResult {
            response_text: reply.text,
            state: context.state(),
            risk_escalated: context.risk_escalated(),
            risk_level,
            input_truncated: truncated,
            directive,
        })
    }
}

/// Cuts `text` to at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}
