//! Dialogue module.
//!
//! The per-session state machine and the policy that picks one response
//! strategy per turn.

mod directive;
mod exercise;
mod manager;
mod state;

pub use directive::{ListeningFocus, Strategy, StrategyDirective, StrategyKind};
pub use exercise::BreathingTechnique;
pub use manager::{DialogueManager, TurnInput};
pub use state::{ActiveStrategy, DialogueState};
