//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::fixed::FixedClock;
use crate::adapters::live::{LiveClock, LiveIdGenerator};
use crate::adapters::recording::{RecordingClock, RecordingIdGenerator};
use crate::adapters::replaying::{ReplayingClock, ReplayingIdGenerator};
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::CassetteMode;
use crate::error::EventIdError;
use crate::ports::clock::Clock;
use crate::ports::id_gen::IdGenerator;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, fixed,
/// recording, replaying).
pub struct ServiceContext {
    /// Clock used when a caller omits the timestamp.
    pub clock: Box<dyn Clock>,
    /// Random ID source for the uuid method.
    pub id_gen: Box<dyn IdGenerator>,
}

/// How many readings a command will take from each port.
///
/// Replay is checked against this before the command runs, so a short
/// cassette is reported as an error instead of failing mid-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortDemand {
    /// Calls to [`Clock::now`].
    pub clock_reads: usize,
    /// Calls to [`IdGenerator::generate_id`].
    pub ids: usize,
}

impl PortDemand {
    /// A command that reads neither port.
    pub const NONE: Self = Self { clock_reads: 0, ids: 0 };
}

/// An in-progress recording. Finish it after the context that feeds it has
/// been dropped.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, EventIdError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| EventIdError::RecorderInUse)?
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        recorder.finish()
    }
}

impl ServiceContext {
    /// Creates a live context: system clock and `uuid` v4.
    #[must_use]
    pub fn live() -> Self {
        Self::with_ports(Box::new(LiveClock), Box::new(LiveIdGenerator::new()))
    }

    /// Creates a context whose clock is pinned to `unix_seconds`; random IDs
    /// stay live.
    #[must_use]
    pub fn fixed(unix_seconds: i64) -> Self {
        Self::with_ports(
            Box::new(FixedClock::from_unix(unix_seconds)),
            Box::new(LiveIdGenerator::new()),
        )
    }

    /// Creates a context from arbitrary port implementations.
    #[must_use]
    pub fn with_ports(clock: Box<dyn Clock>, id_gen: Box<dyn IdGenerator>) -> Self {
        Self { clock, id_gen }
    }

    /// Creates a recording context that captures every clock reading and
    /// random ID into a cassette at `path`.
    ///
    /// Drop the context, then call [`RecordingSession::finish`] to write the file.
    #[must_use]
    pub fn recording(path: &Path) -> (Self, RecordingSession) {
        let name = path
            .file_stem()
            .map_or_else(|| "event-id-session".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name)));

        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            id_gen: Box::new(RecordingIdGenerator::new(
                Box::new(LiveIdGenerator::new()),
                Arc::clone(&recorder),
            )),
        };
        (ctx, RecordingSession { recorder })
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// The clock and ID generator each get their own replayer, so their
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, EventIdError> {
        Self::replaying_for(path, PortDemand::NONE)
    }

    /// Creates a replaying context that is known to hold at least `demand`
    /// readings for each port.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed, or
    /// holds fewer readings than `demand`.
    pub fn replaying_for(path: &Path, demand: PortDemand) -> Result<Self, EventIdError> {
        let cassette = crate::cassette::load(path)?;
        tracing::debug!(
            path = %path.display(),
            interactions = cassette.interactions.len(),
            "replaying cassette"
        );

        let clock = CassetteReplayer::new(&cassette);
        let ids = CassetteReplayer::new(&cassette);
        ensure_available(path, &clock, "clock", "now", demand.clock_reads)?;
        ensure_available(path, &ids, "id_gen", "generate_id", demand.ids)?;

        Ok(Self::with_ports(
            Box::new(ReplayingClock::new(clock)),
            Box::new(ReplayingIdGenerator::new(ids)),
        ))
    }

    /// Builds the context for a configured cassette mode and a command that
    /// will make `demand` port calls.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded or cannot
    /// cover `demand`.
    pub fn for_mode(
        mode: &CassetteMode,
        demand: PortDemand,
    ) -> Result<(Self, Option<RecordingSession>), EventIdError> {
        match mode {
            CassetteMode::Live => Ok((Self::live(), None)),
            CassetteMode::Record(path) => {
                let (ctx, session) = Self::recording(path);
                Ok((ctx, Some(session)))
            }
            CassetteMode::Replay(path) => Ok((Self::replaying_for(path, demand)?, None)),
        }
    }
}

fn ensure_available(
    path: &Path,
    replayer: &CassetteReplayer,
    port: &'static str,
    method: &'static str,
    needed: usize,
) -> Result<(), EventIdError> {
    let available = replayer.remaining(port, method);
    if available < needed {
        return Err(EventIdError::CassetteExhausted {
            path: path.to_path_buf(),
            port,
            method,
            needed,
            available,
        });
    }
    Ok(())
}
