//! Process configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first (see `main`), so
//! either works:
//!
//! - `EVENT_ID_RECORD=<path>`: record clock readings and random IDs to a
//!   cassette at `<path>`.
//! - `EVENT_ID_REPLAY=<path>`: serve clock readings and random IDs from the
//!   cassette at `<path>`.

use std::path::PathBuf;

use crate::error::EventIdError;

/// Environment variable naming a cassette to record into.
pub const RECORD_VAR: &str = "EVENT_ID_RECORD";

/// Environment variable naming a cassette to replay from.
pub const REPLAY_VAR: &str = "EVENT_ID_REPLAY";

/// Where the clock and random IDs come from for this run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CassetteMode {
    /// System clock and `uuid` v4.
    #[default]
    Live,
    /// Live ports, with every reading written to the given cassette.
    Record(PathBuf),
    /// Readings served from the given cassette.
    Replay(PathBuf),
}

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Cassette handling.
    pub cassette: CassetteMode,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if both cassette variables are set.
    pub fn from_env() -> Result<Self, EventIdError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if both cassette variables are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EventIdError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let cassette = match (read(RECORD_VAR), read(REPLAY_VAR)) {
            (Some(_), Some(_)) => return Err(EventIdError::ConflictingCassetteModes),
            (Some(path), None) => CassetteMode::Record(path),
            (None, Some(path)) => CassetteMode::Replay(path),
            (None, None) => CassetteMode::Live,
        };
        Ok(Self { cassette })
    }
}
