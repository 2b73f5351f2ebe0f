//! Session domain module.
//!
//! A session is one bounded, ephemeral conversation and the unit of
//! context isolation. Its context holds recent turns, the mood log and the
//! dialogue state, and is discarded when the session ends.

mod context;
mod errors;
mod mood;

pub use context::{
    InputSummary, SessionContext, SessionLimits, TurnRecord, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_MAX_MOOD_ENTRIES,
};
pub use errors::SessionError;
pub use mood::{MoodEntry, MoodLabel, MoodSummary, MoodTrend};
