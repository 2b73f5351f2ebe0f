//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Returns true if more than `idle` has passed between `self` and `now`.
    pub fn is_idle_longer_than(&self, idle: std::time::Duration, now: &Timestamp) -> bool {
        match Duration::from_std(idle) {
            Ok(limit) => now.duration_since(self) > limit,
            // An idle limit beyond chrono's range never expires.
            Err(_) => false,
        }
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn plus_secs_adds_correctly() {
        let ts1 = Timestamp::now();
        let ts2 = ts1.plus_secs(60);
        assert_eq!(ts2.duration_since(&ts1).num_seconds(), 60);
    }

    mod idle {
        use super::*;

        #[test]
        fn not_idle_within_limit() {
            let last = Timestamp::now();
            let now = last.plus_secs(10);
            assert!(!last.is_idle_longer_than(std::time::Duration::from_secs(30), &now));
        }

        #[test]
        fn idle_past_limit() {
            let last = Timestamp::now();
            let now = last.plus_secs(31);
            assert!(last.is_idle_longer_than(std::time::Duration::from_secs(30), &now));
        }

        #[test]
        fn exactly_at_limit_is_not_idle() {
            let last = Timestamp::now();
            let now = last.plus_secs(30);
            assert!(!last.is_idle_longer_than(std::time::Duration::from_secs(30), &now));
        }
    }
}
