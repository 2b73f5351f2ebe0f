//! Dialogue state machine.
//!
//! Defines the per-session conversational states and the moves allowed
//! between them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::exercise::BreathingTechnique;

/// The conversational state of a session.
///
/// - `Idle`: no multi-turn flow in progress
/// - `InExerciseFlow`: walking through (or offering) a breathing exercise
/// - `AwaitingMoodInput`: asked the user for a mood rating
/// - `CrisisFlow`: crisis resources are re-offered every turn
///
/// There is no terminal state; ending a session discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Idle,
    InExerciseFlow,
    AwaitingMoodInput,
    CrisisFlow,
}

impl DialogueState {
    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::CrisisFlow)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            // Crisis can be entered from anywhere
            (_, CrisisFlow) |
            // Any non-crisis state may settle back to idle or stay put
            (Idle | InExerciseFlow | AwaitingMoodInput, Idle) |
            (InExerciseFlow, InExerciseFlow) |
            (AwaitingMoodInput, AwaitingMoodInput) |
            // Starting flows
            (Idle | AwaitingMoodInput, InExerciseFlow) |
            (Idle | InExerciseFlow, AwaitingMoodInput) |
            // Leaving crisis only through explicit de-escalation
            (CrisisFlow, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Idle => vec![Idle, InExerciseFlow, AwaitingMoodInput, CrisisFlow],
            InExerciseFlow => vec![Idle, InExerciseFlow, AwaitingMoodInput, CrisisFlow],
            AwaitingMoodInput => vec![Idle, InExerciseFlow, AwaitingMoodInput, CrisisFlow],
            CrisisFlow => vec![Idle, CrisisFlow],
        }
    }
}

/// What a multi-turn flow expects from the next user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveStrategy {
    /// An exercise was offered; waiting for yes/no.
    AwaitingExerciseConfirmation { technique: BreathingTechnique },
    /// Showing `step` (zero-based) of an exercise; waiting for next/stop.
    ExerciseStep {
        technique: BreathingTechnique,
        step: usize,
    },
    /// Waiting for a mood rating.
    AwaitingMoodValue,
    /// Crisis resources are on screen; waiting for de-escalation.
    CrisisSupport,
}

impl ActiveStrategy {
    /// The dialogue state this flow belongs to.
    pub fn state(&self) -> DialogueState {
        match self {
            Self::AwaitingExerciseConfirmation { .. } | Self::ExerciseStep { .. } => {
                DialogueState::InExerciseFlow
            }
            Self::AwaitingMoodValue => DialogueState::AwaitingMoodInput,
            Self::CrisisSupport => DialogueState::CrisisFlow,
        }
    }
}
