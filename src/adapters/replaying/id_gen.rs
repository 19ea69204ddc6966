//! Replaying adapter for the `IdGenerator` port.

use std::sync::{Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::id_gen::IdGenerator;

/// Replays recorded IDs from a cassette.
pub struct ReplayingIdGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIdGenerator {
    /// Creates a new replaying ID generator from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IdGenerator for ReplayingIdGenerator {
    /// # Panics
    ///
    /// Panics when the cassette has no ID left or the recorded value is not
    /// a string.
    fn generate_id(&self) -> String {
        let interaction = self
            .replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_interaction("id_gen", "generate_id");
        match interaction.output {
            serde_json::Value::String(id) => id,
            other => {
                panic!("id_gen::generate_id seq={}: expected string, got {other}", interaction.seq)
            }
        }
    }
}
