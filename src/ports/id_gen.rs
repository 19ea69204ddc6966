//! ID generator port for producing random identifiers.

/// Generates random 128-bit identifiers.
///
/// Implementations return 32 lowercase hexadecimal digits with no
/// separators. Abstracting the source allows replaying a recorded sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new random identifier string.
    fn generate_id(&self) -> String;
}
