//! Adapters implementing the port traits.
//!
//! - [`live`]: the system clock and `uuid` v4.
//! - [`fixed`]: a clock pinned to one instant.
//! - [`recording`]: wrap another adapter and capture its outputs to a cassette.
//! - [`replaying`]: serve outputs captured by a previous recording.

pub mod fixed;
pub mod live;
pub mod recording;
pub mod replaying;
