//! Crisis Diagnostics Port - Interface for reporting safety-relevant events.
//!
//! Reports never carry user text; only session ids, extractor names and
//! curated trigger phrases.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::resources::ResourceCategory;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CrisisEvent {
    /// The risk detector failed or timed out; the turn was treated as ELEVATED.
    RiskDetectorFailed { reason: String },

    /// A turn was rated HIGH and answered with crisis resources.
    CrisisEscalated { matched_triggers: BTreeSet<String> },

    /// The crisis entry could not be read; a built-in block was used.
    CrisisResourceUnavailable { category: ResourceCategory, reason: String },
}

/// One diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisDiagnostic {
    pub session_id: SessionId,
    pub event: CrisisEvent,
    pub reported_at: Timestamp,
}

impl CrisisDiagnostic {
    pub fn new(session_id: SessionId, event: CrisisEvent) -> Self {
        Self {
            session_id,
            event,
            reported_at: Timestamp::now(),
        }
    }
}

/// Port for the operator-facing diagnostics channel.
pub trait CrisisDiagnostics: Send + Sync {
    fn report(&self, diagnostic: CrisisDiagnostic);
}
