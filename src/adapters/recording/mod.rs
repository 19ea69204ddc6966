//! Recording adapters that capture port outputs to a cassette.

pub mod clock;
pub mod id_gen;

pub use clock::RecordingClock;
pub use id_gen::RecordingIdGenerator;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record one call and its output.
///
/// Mirror of [`crate::adapters::replaying`]: what is written here is what
/// the replaying adapters read back.
pub(crate) fn record_interaction<O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    output: &O,
) where
    O: Serialize,
{
    let output_json = serde_json::to_value(output).unwrap_or_else(|err| {
        tracing::warn!(port, method, %err, "could not serialize port output; recording null");
        serde_json::Value::Null
    });

    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, serde_json::Value::Null, output_json);
}
