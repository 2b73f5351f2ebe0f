//! Signals module.
//!
//! Value types produced by the intent classifier, sentiment scorer and
//! risk detector for a single turn.

mod bundle;
mod intent;
mod risk;

pub use bundle::{ExtractorKind, SignalBundle, Tone};
pub use intent::Intent;
pub use risk::{RiskAssessment, RiskLevel};
