//! Per-session rolling context.
//!
//! A `SessionContext` is created when a session starts, owned by exactly one
//! session, and dropped when the session ends or idles out. Nothing in it
//! outlives the session.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::domain::dialogue::{ActiveStrategy, DialogueState, StrategyKind};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::signals::SignalBundle;

use super::mood::{MoodEntry, MoodSummary};

/// Default number of turns kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Default cap on mood log entries per session.
pub const DEFAULT_MAX_MOOD_ENTRIES: usize = 500;

/// Characters of user text kept in a turn summary.
const PREVIEW_CHARS: usize = 48;

/// Size bounds applied to one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Maximum turns retained (K).
    pub history_capacity: usize,
    /// Maximum mood entries retained.
    pub max_mood_entries: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_mood_entries: DEFAULT_MAX_MOOD_ENTRIES,
        }
    }
}

/// Short description of a user message kept in turn history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSummary {
    pub word_count: usize,
    pub preview: String,
    pub truncated: bool,
}

impl InputSummary {
    pub fn from_input(text: &str, truncated: bool) -> Self {
        let trimmed = text.trim();
        let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        if trimmed.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        Self {
            word_count: trimmed.split_whitespace().count(),
            preview,
            truncated,
        }
    }
}

/// One resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub input_summary: InputSummary,
    pub signals: SignalBundle,
    pub strategy_used: StrategyKind,
    pub recorded_at: Timestamp,
}

/// Rolling conversational state for a single session.
///
/// Mutators are crate-private: only the dialogue manager changes a
/// context, one turn at a time.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    limits: SessionLimits,
    turn_history: VecDeque<TurnRecord>,
    mood_log: VecDeque<MoodEntry>,
    state: DialogueState,
    active_strategy: Option<ActiveStrategy>,
    risk_escalated: bool,
    turns_processed: u64,
    created_at: Timestamp,
    last_active: Timestamp,
}

impl SessionContext {
    pub fn new(session_id: SessionId, limits: SessionLimits) -> Self {
        let now = Timestamp::now();
        Self {
            session_id,
            limits: SessionLimits {
                history_capacity: limits.history_capacity.max(1),
                max_mood_entries: limits.max_mood_entries.max(1),
            },
            turn_history: VecDeque::with_capacity(limits.history_capacity.max(1)),
            mood_log: VecDeque::new(),
            state: DialogueState::Idle,
            active_strategy: None,
            risk_escalated: false,
            turns_processed: 0,
            created_at: now,
            last_active: now,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn active_strategy(&self) -> Option<ActiveStrategy> {
        self.active_strategy
    }

    /// True once any turn in this session reached HIGH risk. Never resets.
    pub fn risk_escalated(&self) -> bool {
        self.risk_escalated
    }

    /// Most recent turns, oldest first, at most `history_capacity` long.
    pub fn turn_history(&self) -> &VecDeque<TurnRecord> {
        &self.turn_history
    }

    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.turn_history.back()
    }

    pub fn mood_log(&self) -> &VecDeque<MoodEntry> {
        &self.mood_log
    }

    /// Copy of the mood log, oldest first.
    pub fn mood_snapshot(&self) -> Vec<MoodEntry> {
        self.mood_log.iter().copied().collect()
    }

    pub fn mood_summary(&self) -> MoodSummary {
        MoodSummary::from_entries(&self.mood_snapshot())
    }

    /// Total turns processed, including those evicted from history.
    pub fn turns_processed(&self) -> u64 {
        self.turns_processed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_active(&self) -> &Timestamp {
        &self.last_active
    }

    /// Returns true if the session has been idle longer than `idle_timeout`.
    pub fn is_idle(&self, idle_timeout: std::time::Duration, now: &Timestamp) -> bool {
        self.last_active.is_idle_longer_than(idle_timeout, now)
    }

    pub(crate) fn touch(&mut self, now: Timestamp) {
        if self.last_active.is_before(&now) {
            self.last_active = now;
        }
    }

    pub(crate) fn set_state(&mut self, state: DialogueState, active: Option<ActiveStrategy>) {
        self.state = state;
        self.active_strategy = active;
    }

    pub(crate) fn escalate_risk(&mut self) {
        self.risk_escalated = true;
    }

    /// Appends a turn, evicting the oldest beyond capacity.
    pub(crate) fn record_turn(&mut self, turn: TurnRecord) {
        self.turn_history.push_back(turn);
        while self.turn_history.len() > self.limits.history_capacity {
            self.turn_history.pop_front();
        }
        self.turns_processed += 1;
    }

    /// Appends a mood entry, evicting the oldest beyond capacity.
    pub(crate) fn record_mood(&mut self, entry: MoodEntry) {
        self.mood_log.push_back(entry);
        while self.mood_log.len() > self.limits.max_mood_entries {
            self.mood_log.pop_front();
        }
    }
}
