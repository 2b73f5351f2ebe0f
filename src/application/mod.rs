//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (start, submit, end) from
//! query handlers (mood log, mood summary). `SupportAgent` bundles them
//! behind the operations the UI collaborator calls.

mod agent;
pub mod handlers;
mod signal_pipeline;

pub use agent::{AgentSettings, SupportAgent, SupportAgentBuilder};
pub use handlers::{
    EndSessionHandler, GetMoodLogHandler, GetMoodSummaryHandler, StartSessionHandler,
    StartSessionResult, SubmitMessageCommand, SubmitMessageConfig, SubmitMessageHandler,
    SubmitMessageResult,
};
pub use signal_pipeline::{SignalPipeline, DEFAULT_EXTRACTOR_TIMEOUT};
