//! Password generator.
//!
//! Each output position is an independent, uniform draw from the resolved
//! alphabet. The RNG is owned by the generator and advanced on every call; it
//! is seeded once by the caller and never reseeded here.

use std::fmt;

use passgen_proto::PasswordRequest;
use rand::{Rng, RngCore};

use crate::{CharsetRegistry, error::GenerationError};

/// A freshly generated password.
///
/// Holds exactly the requested number of symbols, all taken from one
/// alphabet. Only ASCII symbols exist in the registry, so this is always valid
/// UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPassword(String);

impl GeneratedPassword {
    /// Password text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Password bytes as sent on the wire.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never `true`: zero-length requests are rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the password text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws passwords from a [`CharsetRegistry`] with an injected RNG.
///
/// Generic over the RNG so tests can substitute a seeded, reproducible source.
#[derive(Debug)]
pub struct PasswordGenerator<R> {
    registry: CharsetRegistry,
    rng: R,
}

impl<R: RngCore> PasswordGenerator<R> {
    /// Hard cap on output length, independent of client-side validation.
    pub const MAX_LENGTH: u32 = PasswordRequest::MAX_LENGTH;

    /// Create a generator over `registry` using `rng`.
    pub fn new(registry: CharsetRegistry, rng: R) -> Self {
        Self { registry, rng }
    }

    /// Generate `length` symbols from the alphabet named by `tag`.
    ///
    /// # Errors
    ///
    /// - `GenerationError::UnknownType` if `tag` names no alphabet
    /// - `GenerationError::InvalidLength` if `length` is zero or above
    ///   [`Self::MAX_LENGTH`]
    pub fn generate(&mut self, tag: u8, length: u32) -> Result<GeneratedPassword, GenerationError> {
        let set = self.registry.resolve(tag)?;

        if length == 0 || length > Self::MAX_LENGTH {
            return Err(GenerationError::InvalidLength { length, max: Self::MAX_LENGTH });
        }

        let symbols = set.symbols();
        let password = (0..length)
            .map(|_| {
                let idx = self.rng.gen_range(0..symbols.len());
                char::from(symbols[idx])
            })
            .collect();

        Ok(GeneratedPassword(password))
    }

    /// Generate a password for a decoded request.
    pub fn generate_for(
        &mut self,
        request: &PasswordRequest,
    ) -> Result<GeneratedPassword, GenerationError> {
        self.generate(request.kind.tag(), request.length)
    }

    /// Registry this generator draws from.
    pub fn registry(&self) -> &CharsetRegistry {
        &self.registry
    }
}
