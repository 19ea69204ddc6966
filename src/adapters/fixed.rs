//! Clock pinned to a single instant.

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::Clock;

/// A clock that always reports the same time.
///
/// Useful when a caller wants every defaulted timestamp in a batch to agree,
/// and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to `at`.
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Pins the clock to a Unix timestamp in seconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    #[must_use]
    pub fn from_unix(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
