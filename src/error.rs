//! Error type for the ambient layer: configuration, cassettes, arguments.
//!
//! Generating an event ID never fails; everything here concerns the
//! machinery around it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the generator itself.
#[derive(Error, Debug)]
pub enum EventIdError {
    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    Args(#[from] clap::Error),

    /// Recording and replaying were both requested.
    #[error("EVENT_ID_RECORD and EVENT_ID_REPLAY are mutually exclusive")]
    ConflictingCassetteModes,

    /// A cassette file could not be read.
    #[error("failed to read cassette file {}: {source}", path.display())]
    CassetteRead {
        /// Cassette location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A replay cassette holds fewer readings than the command needs.
    #[error(
        "cassette {} has {available} recorded {port}::{method} interaction(s), \
         but this command needs {needed}",
        path.display()
    )]
    CassetteExhausted {
        /// Cassette location.
        path: PathBuf,
        /// Port that would run dry.
        port: &'static str,
        /// Method on that port.
        method: &'static str,
        /// Readings the command will take.
        needed: usize,
        /// Readings left in the cassette.
        available: usize,
    },

    /// A cassette file could not be written.
    #[error("failed to write cassette file {}: {source}", path.display())]
    CassetteWrite {
        /// Cassette location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A cassette file is not valid YAML for the cassette format.
    #[error("failed to parse cassette file {}: {source}", path.display())]
    CassetteParse {
        /// Cassette location.
        path: PathBuf,
        /// Underlying YAML failure.
        source: serde_yaml::Error,
    },

    /// A recording could not be encoded as YAML.
    #[error("failed to encode cassette {}: {source}", path.display())]
    CassetteEncode {
        /// Cassette location.
        path: PathBuf,
        /// Underlying YAML failure.
        source: serde_yaml::Error,
    },

    /// A recording was still referenced by an adapter when it was finished.
    #[error("cassette recorder still in use; drop the service context first")]
    RecorderInUse,
}
