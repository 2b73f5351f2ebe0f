//! Conversation turn handlers.

mod submit_message;

pub use submit_message::{
    SubmitMessageCommand, SubmitMessageConfig, SubmitMessageHandler, SubmitMessageResult,
};
