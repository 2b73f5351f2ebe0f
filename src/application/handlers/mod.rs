//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;
pub mod session;

pub use conversation::{
    SubmitMessageCommand, SubmitMessageConfig, SubmitMessageHandler, SubmitMessageResult,
};
pub use session::{
    EndSessionHandler, GetMoodLogHandler, GetMoodSummaryHandler, StartSessionHandler,
    StartSessionResult,
};
