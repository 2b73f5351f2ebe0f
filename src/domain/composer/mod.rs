//! Composer module.
//!
//! Renders strategy directives into user-facing text.

mod phrases;
mod response_composer;

pub use response_composer::{ComposedReply, ResponseComposer};
