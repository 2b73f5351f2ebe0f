//! Strategy directives.
//!
//! The dialogue manager's decision for a turn. The response composer
//! consumes each directive exactly once to produce the reply text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::resources::ResourceCategory;
use crate::domain::session::MoodLabel;
use crate::domain::signals::{RiskLevel, Tone};

use super::exercise::BreathingTechnique;

/// What the user was expressing when reflective listening was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListeningFocus {
    Venting,
    Anxiety,
}

/// The chosen response behavior, with its strategy-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    Greeting,
    ReflectiveListening {
        focus: ListeningFocus,
        offer: Option<BreathingTechnique>,
    },
    SleepHygiene,
    ExerciseStep {
        technique: BreathingTechnique,
        step: usize,
    },
    ExerciseComplete {
        technique: BreathingTechnique,
    },
    ExerciseDeclined,
    MoodPrompt,
    MoodLogged {
        label: MoodLabel,
    },
    ResourceLookup {
        category: ResourceCategory,
    },
    ClarifyingQuestion,
    CrisisResponse {
        reoffer: bool,
    },
    CrisisDeEscalation,
    SupportiveFallback,
}

/// Payload-free name of a strategy, kept in turn history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    Greeting,
    ReflectiveListening,
    SleepHygiene,
    ExerciseStep,
    ExerciseComplete,
    ExerciseDeclined,
    MoodPrompt,
    MoodLogged,
    ResourceLookup,
    ClarifyingQuestion,
    CrisisResponse,
    CrisisDeEscalation,
    SupportiveFallback,
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Greeting => StrategyKind::Greeting,
            Strategy::ReflectiveListening { .. } => StrategyKind::ReflectiveListening,
            Strategy::SleepHygiene => StrategyKind::SleepHygiene,
            Strategy::ExerciseStep { .. } => StrategyKind::ExerciseStep,
            Strategy::ExerciseComplete { .. } => StrategyKind::ExerciseComplete,
            Strategy::ExerciseDeclined => StrategyKind::ExerciseDeclined,
            Strategy::MoodPrompt => StrategyKind::MoodPrompt,
            Strategy::MoodLogged { .. } => StrategyKind::MoodLogged,
            Strategy::ResourceLookup { .. } => StrategyKind::ResourceLookup,
            Strategy::ClarifyingQuestion => StrategyKind::ClarifyingQuestion,
            Strategy::CrisisResponse { .. } => StrategyKind::CrisisResponse,
            Strategy::CrisisDeEscalation => StrategyKind::CrisisDeEscalation,
            Strategy::SupportiveFallback => StrategyKind::SupportiveFallback,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::Greeting => "greeting",
            StrategyKind::ReflectiveListening => "reflective_listening",
            StrategyKind::SleepHygiene => "sleep_hygiene",
            StrategyKind::ExerciseStep => "exercise_step",
            StrategyKind::ExerciseComplete => "exercise_complete",
            StrategyKind::ExerciseDeclined => "exercise_declined",
            StrategyKind::MoodPrompt => "mood_prompt",
            StrategyKind::MoodLogged => "mood_logged",
            StrategyKind::ResourceLookup => "resource_lookup",
            StrategyKind::ClarifyingQuestion => "clarifying_question",
            StrategyKind::CrisisResponse => "crisis_response",
            StrategyKind::CrisisDeEscalation => "crisis_de_escalation",
            StrategyKind::SupportiveFallback => "supportive_fallback",
        };
        write!(f, "{}", s)
    }
}

/// A decision for one turn plus the modifiers the composer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDirective {
    pub strategy: Strategy,
    pub tone: Tone,
    /// Risk level of the turn; anything above `None` adds a resource pointer.
    pub risk_level: RiskLevel,
    /// The user's message was cut to the input limit.
    pub input_truncated: bool,
}

impl StrategyDirective {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            tone: Tone::Neutral,
            risk_level: RiskLevel::None,
            input_truncated: false,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_input_truncated(mut self, truncated: bool) -> Self {
        self.input_truncated = truncated;
        self
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Directive of last resort: a supportive reply with a resource pointer.
    pub fn fallback() -> Self {
        Self::new(Strategy::SupportiveFallback)
    }
}
