//! Crisis diagnostics adapters.

mod in_memory_diagnostics;
mod tracing_diagnostics;

pub use in_memory_diagnostics::InMemoryCrisisDiagnostics;
pub use tracing_diagnostics::{TracingCrisisDiagnostics, CRISIS_LOG_TARGET};
