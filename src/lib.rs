//! SergeAI - Conversational Support Core
//!
//! This crate turns a user's free-text message into a supportive reply:
//! it extracts intent, sentiment and crisis risk, advances a small dialogue
//! state machine that always prioritizes safety, and composes the reply from
//! fixed templates and a curated resource library. Sessions are ephemeral
//! and held in memory only.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{AgentSettings, SubmitMessageResult, SupportAgent, SupportAgentBuilder};
pub use domain::foundation::SessionId;
pub use domain::session::SessionError;
