//! Replaying adapters that serve outputs captured by a recording.

pub mod clock;
pub mod id_gen;

pub use clock::ReplayingClock;
pub use id_gen::ReplayingIdGenerator;
