//! Port traits defining external boundaries.
//!
//! The generator itself is pure. The two things it reads from the outside
//! world, the current time and a source of random identifiers, come in
//! through these traits. Implementations live in `src/adapters/`.

pub mod clock;
pub mod id_gen;

pub use clock::Clock;
pub use id_gen::IdGenerator;
