//! Crisis diagnostics emitted through `tracing`.
//!
//! Events go to the `sergeai::crisis` target so operators can route them
//! separately from ordinary logs. Nothing is written to disk by this
//! adapter; where the events end up is the subscriber's choice.

use crate::ports::{CrisisDiagnostic, CrisisDiagnostics, CrisisEvent};

/// Log target for crisis-path events.
pub const CRISIS_LOG_TARGET: &str = "sergeai::crisis";

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCrisisDiagnostics;

impl TracingCrisisDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl CrisisDiagnostics for TracingCrisisDiagnostics {
    fn report(&self, diagnostic: CrisisDiagnostic) {
        let session_id = diagnostic.session_id;
        match diagnostic.event {
            CrisisEvent::RiskDetectorFailed { reason } => {
                tracing::error!(
                    target: CRISIS_LOG_TARGET,
                    session_id = %session_id,
                    reason = %reason,
                    "risk detector failed; turn treated as elevated"
                );
            }
            CrisisEvent::CrisisEscalated { matched_triggers } => {
                tracing::warn!(
                    target: CRISIS_LOG_TARGET,
                    session_id = %session_id,
                    triggers = ?matched_triggers,
                    "crisis flow entered"
                );
            }
            CrisisEvent::CrisisResourceUnavailable { category, reason } => {
                tracing::error!(
                    target: CRISIS_LOG_TARGET,
                    session_id = %session_id,
                    category = %category,
                    reason = %reason,
                    "crisis resource unavailable; built-in block used"
                );
            }
        }
    }
}
