//! Live adapters backed by the operating system.

pub mod clock;
pub mod id_gen;

pub use clock::LiveClock;
pub use id_gen::LiveIdGenerator;
