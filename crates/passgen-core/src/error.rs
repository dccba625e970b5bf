//! Error types for the generation engine.

use thiserror::Error;

/// Errors from charset lookup and password generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Tag does not name a password kind.
    ///
    /// Cannot happen for decoded requests since the decoder already rejects
    /// unknown tags, but the generator does not rely on that.
    #[error("unknown password type {:?}", tag_char(.0))]
    UnknownType(u8),

    /// Requested length is zero or above the hard cap.
    #[error("invalid password length {length}: must be between 1 and {max}")]
    InvalidLength {
        /// Requested length
        length: u32,
        /// Hard cap on output size
        max: u32,
    },
}

/// Errors while seeding the random source.
#[derive(Error, Debug)]
pub enum EntropyError {
    /// System clock reads before the Unix epoch.
    #[error("system clock is before the Unix epoch")]
    ClockBeforeEpoch,

    /// The OS entropy source failed.
    #[error("OS entropy unavailable: {0}")]
    Os(String),
}

fn tag_char(tag: &u8) -> char {
    char::from(*tag)
}
