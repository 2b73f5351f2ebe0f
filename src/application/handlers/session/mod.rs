//! Session lifecycle and mood query handlers.

mod end_session;
mod get_mood_log;
mod live_session;
mod start_session;

pub use end_session::EndSessionHandler;
pub use get_mood_log::{GetMoodLogHandler, GetMoodSummaryHandler};
pub(crate) use live_session::lock_live_session;
pub use start_session::{StartSessionHandler, StartSessionResult};
