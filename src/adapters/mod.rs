//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the conversational core to concrete collaborators:
//!
//! - `signals` - Rule-based intent, sentiment and risk extractors
//! - `resources` - YAML-backed resource library
//! - `storage` - In-memory session store and the idle session reaper
//! - `diagnostics` - Crisis diagnostics via `tracing` or an in-memory ring

pub mod diagnostics;
pub mod resources;
pub mod signals;
pub mod storage;

pub use diagnostics::{InMemoryCrisisDiagnostics, TracingCrisisDiagnostics, CRISIS_LOG_TARGET};
pub use resources::StaticResourceLibrary;
pub use signals::{
    LexiconSentimentScorer, PhraseRiskDetector, RuleBasedIntentClassifier, RISK_LEXICON_VERSION,
};
pub use storage::{IdleReaperConfig, IdleSessionReaper, InMemorySessionStore};
