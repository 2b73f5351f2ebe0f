//! Storage adapters for live sessions.

mod idle_reaper;
mod in_memory_session_store;

pub use idle_reaper::{IdleReaperConfig, IdleSessionReaper};
pub use in_memory_session_store::InMemorySessionStore;
