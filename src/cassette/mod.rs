//! Cassettes: YAML files of recorded port interactions.
//!
//! A run that read the wall clock or drew random identifiers can be
//! recorded and later replayed to reproduce the exact same event IDs.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::Path;

use crate::error::EventIdError;

/// Reads and parses a cassette file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid cassette.
pub fn load(path: &Path) -> Result<format::Cassette, EventIdError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| EventIdError::CassetteRead { path: path.to_path_buf(), source })?;
    serde_yaml::from_str(&content)
        .map_err(|source| EventIdError::CassetteParse { path: path.to_path_buf(), source })
}
