//! Dialogue manager.
//!
//! Decides the response strategy for a turn and applies the resulting state
//! change to the session context. Rules are evaluated in a fixed order and
//! the first that applies wins:
//!
//! 1. HIGH risk on this turn enters `CrisisFlow` and escalates the session.
//!    While in `CrisisFlow`, every turn re-offers crisis resources until the
//!    user asks for resources or explicitly de-escalates.
//! 2. An active exercise or mood follow-up consumes the turn if the input
//!    answers it (yes/no/step number, or a mood value).
//! 3. Otherwise the turn is dispatched on its intent.
//!
//! Every call yields exactly one directive and records exactly one turn.

use once_cell::sync::Lazy;

use crate::domain::foundation::{StateMachine, Timestamp};
use crate::domain::lexicon::{find_phrase, normalize_phrase, Token};
use crate::domain::resources::ResourceCategory;
use crate::domain::session::{InputSummary, MoodEntry, MoodLabel, SessionContext, TurnRecord};
use crate::domain::signals::{Intent, SignalBundle};

use super::directive::{ListeningFocus, Strategy, StrategyDirective};
use super::exercise::BreathingTechnique;
use super::state::{ActiveStrategy, DialogueState};

/// Phrases that end a crisis flow when not negated.
static DE_ESCALATION_PHRASES: Lazy<Vec<Vec<String>>> = Lazy::new(|| {
    [
        "i am safe",
        "im safe",
        "i feel safe",
        "im okay now",
        "im ok now",
        "i am okay now",
        "im fine now",
        "im alright now",
        "feeling better",
        "i feel better",
        "talk about something else",
        "lets move on",
        "continue our conversation",
        "back to normal",
    ]
    .iter()
    .map(|p| normalize_phrase(p))
    .collect()
});

const AFFIRM_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "y", "ok", "okay", "sure", "ready", "next", "continue", "go",
    "done", "alright", "start", "begin",
];

const DECLINE_WORDS: &[&str] = &[
    "no", "nope", "stop", "quit", "exit", "cancel", "later", "enough", "nah",
];

/// Words allowed around a step number ("step 3", "go to 3 please").
const STEP_FILLER: &[&str] = &["step", "number", "go", "to", "please", "lets", "do", "skip"];

/// How the user answered an exercise prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowReply {
    Affirm,
    Decline,
    /// One-based step number.
    Jump(usize),
    Unrecognized,
}

impl FlowReply {
    fn parse(tokens: &[Token]) -> Self {
        let words: Vec<&Token> = tokens.iter().filter(|t| t.is_word()).collect();

        if let Some(n) = step_answer(&words) {
            return FlowReply::Jump(n);
        }
        if words
            .iter()
            .any(|t| !t.is_negated() && DECLINE_WORDS.contains(&t.text()))
        {
            return FlowReply::Decline;
        }
        // "don't stop" asks to keep going
        if words.iter().any(|t| {
            if t.is_negated() {
                DECLINE_WORDS.contains(&t.text())
            } else {
                AFFIRM_WORDS.contains(&t.text())
            }
        }) {
            return FlowReply::Affirm;
        }
        FlowReply::Unrecognized
    }
}

/// A reply made only of one number and step filler words.
fn step_answer(words: &[&Token]) -> Option<usize> {
    let mut number = None;
    for token in words {
        match token.text().parse::<usize>() {
            Ok(n) if number.is_none() => number = Some(n),
            Ok(_) => return None,
            Err(_) if STEP_FILLER.contains(&token.text()) => {}
            Err(_) => return None,
        }
    }
    number
}

/// One user turn as seen by the dialogue manager.
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    /// The (possibly truncated) message text.
    pub text: &'a str,
    pub tokens: &'a [Token],
    /// The message was cut to the input limit.
    pub truncated: bool,
}

/// Outcome of a rule before it is applied to the context.
#[derive(Debug, Clone, Copy)]
struct Decision {
    strategy: Strategy,
    next_state: DialogueState,
    active: Option<ActiveStrategy>,
    mood: Option<MoodLabel>,
    escalate: bool,
}

impl Decision {
    fn settle(strategy: Strategy) -> Self {
        Self {
            strategy,
            next_state: DialogueState::Idle,
            active: None,
            mood: None,
            escalate: false,
        }
    }

    fn enter(strategy: Strategy, active: ActiveStrategy) -> Self {
        Self {
            strategy,
            next_state: active.state(),
            active: Some(active),
            mood: None,
            escalate: false,
        }
    }

    fn crisis(reoffer: bool, escalate: bool) -> Self {
        Self {
            escalate,
            ..Self::enter(Strategy::CrisisResponse { reoffer }, ActiveStrategy::CrisisSupport)
        }
    }

    fn with_mood(mut self, label: MoodLabel) -> Self {
        self.mood = Some(label);
        self
    }
}

/// The per-turn decision policy.
#[derive(Debug, Clone, Default)]
pub struct DialogueManager {
    default_technique: BreathingTechnique,
}

impl DialogueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Technique used when the user asks for an exercise without naming one.
    pub fn with_default_technique(mut self, technique: BreathingTechnique) -> Self {
        self.default_technique = technique;
        self
    }

    /// Resolves one turn: picks a strategy, updates state, records the turn.
    pub fn decide(
        &self,
        context: &mut SessionContext,
        turn: &TurnInput<'_>,
        signals: SignalBundle,
    ) -> StrategyDirective {
        let decision = self.evaluate(context, turn, &signals);
        let current = context.state();

        let strategy = match current.transition_to(decision.next_state) {
            Ok(next) => {
                if decision.escalate {
                    context.escalate_risk();
                }
                if let Some(label) = decision.mood {
                    context.record_mood(MoodEntry::new(label));
                }
                context.set_state(next, decision.active);
                decision.strategy
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %context.session_id(),
                    code = %err.code(),
                    error = %err,
                    "rejected dialogue transition; keeping current state"
                );
                Strategy::SupportiveFallback
            }
        };

        let directive = StrategyDirective::new(strategy)
            .with_tone(signals.tone())
            .with_risk_level(signals.risk_level())
            .with_input_truncated(turn.truncated);

        tracing::debug!(
            session_id = %context.session_id(),
            intent = %signals.intent(),
            risk = ?signals.risk_level(),
            strategy = %directive.kind(),
            state = ?context.state(),
            "turn resolved"
        );

        let now = Timestamp::now();
        context.record_turn(TurnRecord {
            input_summary: InputSummary::from_input(turn.text, turn.truncated),
            signals,
            strategy_used: directive.kind(),
            recorded_at: now,
        });
        context.touch(now);

        directive
    }

    fn evaluate(
        &self,
        context: &SessionContext,
        turn: &TurnInput<'_>,
        signals: &SignalBundle,
    ) -> Decision {
        if signals.risk_level().is_high() {
            return Decision::crisis(context.state().is_crisis(), true);
        }

        if context.state().is_crisis() {
            return self.continue_crisis(turn, signals);
        }

        if let Some(decision) = self.continue_flow(context, turn) {
            return decision;
        }

        self.dispatch(turn, signals)
    }

    fn continue_crisis(&self, turn: &TurnInput<'_>, signals: &SignalBundle) -> Decision {
        if signals.intent() == Intent::ResourceRequest {
            return Decision::settle(Strategy::ResourceLookup {
                category: ResourceCategory::requested_in(turn.tokens),
            });
        }
        if is_de_escalation(turn.tokens) {
            return Decision::settle(Strategy::CrisisDeEscalation);
        }
        Decision::crisis(true, false)
    }

    fn continue_flow(&self, context: &SessionContext, turn: &TurnInput<'_>) -> Option<Decision> {
        match context.active_strategy()? {
            ActiveStrategy::AwaitingExerciseConfirmation { technique } => {
                // Consent must be explicit before the first step
                match FlowReply::parse(turn.tokens) {
                    FlowReply::Affirm => Some(step_decision(technique, 0)),
                    FlowReply::Decline => Some(Decision::settle(Strategy::ExerciseDeclined)),
                    _ => None,
                }
            }
            ActiveStrategy::ExerciseStep { technique, step } => {
                match FlowReply::parse(turn.tokens) {
                    FlowReply::Affirm if step + 1 >= technique.step_count() => {
                        Some(Decision::settle(Strategy::ExerciseComplete { technique }))
                    }
                    FlowReply::Affirm => Some(step_decision(technique, step + 1)),
                    FlowReply::Jump(n) if (1..=technique.step_count()).contains(&n) => {
                        Some(step_decision(technique, n - 1))
                    }
                    FlowReply::Decline => Some(Decision::settle(Strategy::ExerciseDeclined)),
                    _ => None,
                }
            }
            ActiveStrategy::AwaitingMoodValue => MoodLabel::parse(turn.tokens)
                .map(|label| Decision::settle(Strategy::MoodLogged { label }).with_mood(label)),
            ActiveStrategy::CrisisSupport => None,
        }
    }

    fn dispatch(&self, turn: &TurnInput<'_>, signals: &SignalBundle) -> Decision {
        match signals.intent() {
            Intent::Greeting => Decision::settle(Strategy::Greeting),
            Intent::Vent => Decision::settle(Strategy::ReflectiveListening {
                focus: ListeningFocus::Venting,
                offer: None,
            }),
            Intent::Anxiety => {
                let technique = self.technique_for(turn.tokens);
                Decision::enter(
                    Strategy::ReflectiveListening {
                        focus: ListeningFocus::Anxiety,
                        offer: Some(technique),
                    },
                    ActiveStrategy::AwaitingExerciseConfirmation { technique },
                )
            }
            // The intent classifier saw crisis language the risk detector did
            // not rate HIGH; answer as a crisis rather than pass it through.
            Intent::CrisisRisk => Decision::crisis(false, true),
            Intent::Sleep => Decision::settle(Strategy::SleepHygiene),
            Intent::ExerciseRequest => step_decision(self.technique_for(turn.tokens), 0),
            Intent::MoodLog => match MoodLabel::parse(turn.tokens) {
                Some(label) => Decision::settle(Strategy::MoodLogged { label }).with_mood(label),
                None => Decision::enter(Strategy::MoodPrompt, ActiveStrategy::AwaitingMoodValue),
            },
            Intent::ResourceRequest => Decision::settle(Strategy::ResourceLookup {
                category: ResourceCategory::requested_in(turn.tokens),
            }),
            Intent::Unknown => Decision::settle(Strategy::ClarifyingQuestion),
        }
    }

    fn technique_for(&self, tokens: &[Token]) -> BreathingTechnique {
        BreathingTechnique::mentioned_in(tokens).unwrap_or(self.default_technique)
    }
}

fn step_decision(technique: BreathingTechnique, step: usize) -> Decision {
    Decision::enter(
        Strategy::ExerciseStep { technique, step },
        ActiveStrategy::ExerciseStep { technique, step },
    )
}

fn is_de_escalation(tokens: &[Token]) -> bool {
    DE_ESCALATION_PHRASES.iter().any(|phrase| {
        find_phrase(tokens, phrase)
            .into_iter()
            .any(|start| !tokens[start].is_negated())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::StrategyKind;
    use crate::domain::foundation::SessionId;
    use crate::domain::lexicon::LexicalAnalyzer;
    use crate::domain::session::SessionLimits;
    use crate::domain::signals::{RiskAssessment, RiskLevel};
    use std::collections::BTreeSet;

    fn context() -> SessionContext {
        SessionContext::new(SessionId::new(), SessionLimits::default())
    }

    fn signals(intent: Intent, risk: RiskLevel) -> SignalBundle {
        SignalBundle::new(intent, 0.0, RiskAssessment::new(risk, BTreeSet::new()))
    }

    fn run(
        manager: &DialogueManager,
        ctx: &mut SessionContext,
        text: &str,
        intent: Intent,
        risk: RiskLevel,
    ) -> StrategyDirective {
        let tokens = LexicalAnalyzer::new().normalize(text);
        let turn = TurnInput {
            text,
            tokens: &tokens,
            truncated: false,
        };
        manager.decide(ctx, &turn, signals(intent, risk))
    }

    mod crisis {
        use super::*;

        #[test]
        fn high_risk_enters_crisis_from_idle() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "x", Intent::Vent, RiskLevel::High);
            assert_eq!(directive.strategy, Strategy::CrisisResponse { reoffer: false });
            assert_eq!(ctx.state(), DialogueState::CrisisFlow);
            assert!(ctx.risk_escalated());
        }

        #[test]
        fn high_risk_preempts_exercise_flow() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            assert_eq!(ctx.state(), DialogueState::InExerciseFlow);
            let directive = run(&manager, &mut ctx, "yes", Intent::Unknown, RiskLevel::High);
            assert_eq!(directive.kind(), StrategyKind::CrisisResponse);
            assert_eq!(ctx.state(), DialogueState::CrisisFlow);
        }

        #[test]
        fn crisis_reoffers_on_ordinary_turns() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "x", Intent::Unknown, RiskLevel::High);
            let directive = run(&manager, &mut ctx, "whatever", Intent::Unknown, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::CrisisResponse { reoffer: true });
            assert_eq!(ctx.state(), DialogueState::CrisisFlow);
        }

        #[test]
        fn resource_request_leaves_crisis_but_keeps_escalation() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "x", Intent::Unknown, RiskLevel::High);
            let directive = run(
                &manager,
                &mut ctx,
                "show me a hotline",
                Intent::ResourceRequest,
                RiskLevel::None,
            );
            assert_eq!(
                directive.strategy,
                Strategy::ResourceLookup {
                    category: ResourceCategory::Crisis
                }
            );
            assert_eq!(ctx.state(), DialogueState::Idle);
            assert!(ctx.risk_escalated());
        }

        #[test]
        fn explicit_de_escalation_returns_to_idle() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "x", Intent::Unknown, RiskLevel::High);
            let directive = run(&manager, &mut ctx, "I'm safe now", Intent::Unknown, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::CrisisDeEscalation);
            assert_eq!(ctx.state(), DialogueState::Idle);
            assert!(ctx.risk_escalated());
        }

        #[test]
        fn negated_de_escalation_stays_in_crisis() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "x", Intent::Unknown, RiskLevel::High);
            run(&manager, &mut ctx, "not feeling better", Intent::Unknown, RiskLevel::None);
            assert_eq!(ctx.state(), DialogueState::CrisisFlow);
        }

        #[test]
        fn crisis_intent_without_high_risk_still_answers_as_crisis() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "x", Intent::CrisisRisk, RiskLevel::Elevated);
            assert_eq!(directive.kind(), StrategyKind::CrisisResponse);
            assert!(ctx.risk_escalated());
        }
    }

    mod exercise_flow {
        use super::*;

        #[test]
        fn request_enters_flow_at_first_step() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive =
                run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::ExerciseStep {
                    technique: BreathingTechnique::Box,
                    step: 0
                }
            );
            assert_eq!(ctx.state(), DialogueState::InExerciseFlow);
        }

        #[test]
        fn affirm_advances_and_last_step_completes() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "grounding", Intent::ExerciseRequest, RiskLevel::None);
            let steps = BreathingTechnique::Grounding.step_count();
            for expected in 1..steps {
                let directive = run(&manager, &mut ctx, "next", Intent::Unknown, RiskLevel::None);
                assert_eq!(
                    directive.strategy,
                    Strategy::ExerciseStep {
                        technique: BreathingTechnique::Grounding,
                        step: expected
                    }
                );
            }
            let directive = run(&manager, &mut ctx, "done", Intent::Unknown, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::ExerciseComplete {
                    technique: BreathingTechnique::Grounding
                }
            );
            assert_eq!(ctx.state(), DialogueState::Idle);
        }

        #[test]
        fn step_number_jumps() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            let directive = run(&manager, &mut ctx, "3", Intent::Unknown, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::ExerciseStep {
                    technique: BreathingTechnique::Box,
                    step: 2
                }
            );
        }

        #[test]
        fn decline_exits_to_idle() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            let directive = run(&manager, &mut ctx, "stop", Intent::Unknown, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::ExerciseDeclined);
            assert_eq!(ctx.state(), DialogueState::Idle);
        }

        #[test]
        fn unrelated_input_leaves_flow_and_dispatches() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            let directive = run(&manager, &mut ctx, "I can't sleep", Intent::Sleep, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::SleepHygiene);
            assert_eq!(ctx.state(), DialogueState::Idle);
        }

        #[test]
        fn anxiety_offer_accepted_starts_exercise() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "so anxious", Intent::Anxiety, RiskLevel::None);
            assert_eq!(directive.kind(), StrategyKind::ReflectiveListening);
            assert_eq!(
                ctx.active_strategy(),
                Some(ActiveStrategy::AwaitingExerciseConfirmation {
                    technique: BreathingTechnique::Box
                })
            );
            let directive = run(&manager, &mut ctx, "yes please", Intent::Unknown, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::ExerciseStep {
                    technique: BreathingTechnique::Box,
                    step: 0
                }
            );
        }

        #[test]
        fn negated_affirmation_is_not_consent() {
            assert_eq!(
                FlowReply::parse(&LexicalAnalyzer::new().normalize("not sure")),
                FlowReply::Unrecognized
            );
        }

        #[test]
        fn negated_decline_keeps_going() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "exercises", Intent::ExerciseRequest, RiskLevel::None);
            let directive = run(
                &manager,
                &mut ctx,
                "don't stop, next step please",
                Intent::Unknown,
                RiskLevel::None,
            );
            assert_eq!(
                directive.strategy,
                Strategy::ExerciseStep {
                    technique: BreathingTechnique::Box,
                    step: 1
                }
            );
            assert_eq!(ctx.state(), DialogueState::InExerciseFlow);
        }

        #[test]
        fn step_phrasing_jumps() {
            let parse = |text: &str| FlowReply::parse(&LexicalAnalyzer::new().normalize(text));
            assert_eq!(parse("step 4"), FlowReply::Jump(4));
            assert_eq!(parse("go to 2 please"), FlowReply::Jump(2));
            assert_eq!(parse("I have 3 exams tomorrow"), FlowReply::Unrecognized);
        }

        #[test]
        fn number_in_sentence_does_not_skip_consent() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "so anxious", Intent::Anxiety, RiskLevel::None);
            let directive = run(
                &manager,
                &mut ctx,
                "I have 3 exams tomorrow and I feel sad",
                Intent::Vent,
                RiskLevel::None,
            );
            assert_eq!(directive.kind(), StrategyKind::ReflectiveListening);
            assert_eq!(ctx.state(), DialogueState::Idle);
        }

        #[test]
        fn bare_number_does_not_confirm_offer() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            run(&manager, &mut ctx, "so anxious", Intent::Anxiety, RiskLevel::None);
            let directive = run(&manager, &mut ctx, "3", Intent::Unknown, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::ClarifyingQuestion);
        }
    }

    mod mood {
        use super::*;

        #[test]
        fn mood_with_value_is_logged() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "log mood 4", Intent::MoodLog, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::MoodLogged {
                    label: MoodLabel::Good
                }
            );
            assert_eq!(ctx.mood_log().len(), 1);
            assert_eq!(ctx.state(), DialogueState::Idle);
        }

        #[test]
        fn mood_without_value_asks_follow_up() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "log my mood", Intent::MoodLog, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::MoodPrompt);
            assert_eq!(ctx.state(), DialogueState::AwaitingMoodInput);

            run(&manager, &mut ctx, "pretty good", Intent::Unknown, RiskLevel::None);
            assert_eq!(ctx.state(), DialogueState::Idle);
            assert_eq!(ctx.mood_log()[0].mood_label, MoodLabel::Good);
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn unknown_asks_clarifying_question() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "", Intent::Unknown, RiskLevel::None);
            assert_eq!(directive.strategy, Strategy::ClarifyingQuestion);
        }

        #[test]
        fn vent_listens_without_offer() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "awful day", Intent::Vent, RiskLevel::None);
            assert_eq!(
                directive.strategy,
                Strategy::ReflectiveListening {
                    focus: ListeningFocus::Venting,
                    offer: None
                }
            );
        }

        #[test]
        fn elevated_risk_is_carried_on_directive() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            let directive = run(&manager, &mut ctx, "hopeless", Intent::Vent, RiskLevel::Elevated);
            assert_eq!(directive.risk_level, RiskLevel::Elevated);
            assert!(!ctx.risk_escalated());
        }
    }

    mod history {
        use super::*;

        #[test]
        fn every_turn_is_recorded_and_bounded() {
            let manager = DialogueManager::new();
            let mut ctx = context();
            for _ in 0..25 {
                run(&manager, &mut ctx, "hi", Intent::Greeting, RiskLevel::None);
            }
            assert_eq!(ctx.turn_history().len(), ctx.limits().history_capacity);
            assert_eq!(ctx.turns_processed(), 25);
            assert_eq!(
                ctx.last_turn().unwrap().strategy_used,
                StrategyKind::Greeting
            );
        }
    }
}
