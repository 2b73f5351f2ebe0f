//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversational core and its collaborators. Adapters implement these
//! ports.
//!
//! ## Signal Ports
//!
//! - `IntentClassifier` - Picks the primary intent of a turn
//! - `SentimentScorer` - Scores a turn in [-1, 1]
//! - `RiskDetector` - Rates crisis risk from tokens and the full raw text
//!
//! ## Collaborator Ports
//!
//! - `ResourceLibrary` - Static support content keyed by category
//! - `SessionStore` - Live session contexts, one lock per session
//! - `CrisisDiagnostics` - Operator channel for safety-relevant events

mod crisis_diagnostics;
mod resource_library;
mod session_store;
mod signal_extractor;

pub use crisis_diagnostics::{CrisisDiagnostic, CrisisDiagnostics, CrisisEvent};
pub use resource_library::{ResourceError, ResourceLibrary};
pub use session_store::{SessionHandle, SessionStore};
pub use signal_extractor::{ExtractorError, IntentClassifier, RiskDetector, SentimentScorer};
