//! Replaying adapter for the Clock port.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics when the cassette has no clock reading left, or the recorded
    /// value is not an RFC 3339 timestamp.
    fn now(&self) -> DateTime<Utc> {
        let interaction = self
            .replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_interaction("clock", "now");
        serde_json::from_value(interaction.output).unwrap_or_else(|err| {
            panic!("clock::now seq={}: recorded value is not a timestamp: {err}", interaction.seq)
        })
    }
}
