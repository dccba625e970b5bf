//! Character-set registry.
//!
//! Maps each [`PasswordKind`] to a fixed alphabet. The alphabets are
//! compile-time constants; the registry only indexes them, so it is `Copy` and
//! can be handed to as many generators as needed.

use passgen_proto::PasswordKind;

use crate::error::GenerationError;

const NUMERIC: &[u8] = b"0123456789";

const ALPHABETIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

const MIXED: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const SECURE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                        abcdefghijklmnopqrstuvwxyz\
                        0123456789\
                        !@#$%^&*()_+-=,./<>?";

// SECURE minus 0/O/o, 1/l/I/i, 2/Z/z, 5/S/s and 8/B.
const UNAMBIGUOUS: &[u8] = b"ACDEFGHJKLMNPQRTUVWXY\
                             abcdefghjkmnpqrtuvwxy\
                             34679\
                             !@#$%^&*()_+-=,./<>?";

/// An immutable, ordered alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    kind: PasswordKind,
    symbols: &'static [u8],
}

impl CharacterSet {
    /// Kind this alphabet serves.
    #[must_use]
    pub fn kind(&self) -> PasswordKind {
        self.kind
    }

    /// Symbols in table order.
    #[must_use]
    pub fn symbols(&self) -> &'static [u8] {
        self.symbols
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false` for the built-in sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `symbol` belongs to this alphabet.
    #[must_use]
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// Lookup table from password kind to alphabet.
#[derive(Debug, Clone, Copy)]
pub struct CharsetRegistry {
    sets: [CharacterSet; 5],
}

impl CharsetRegistry {
    /// Build the registry of the five predefined sets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: PasswordKind::ALL.map(|kind| CharacterSet { kind, symbols: symbols_for(kind) }),
        }
    }

    /// Alphabet for a known kind.
    #[must_use]
    pub fn get(&self, kind: PasswordKind) -> &CharacterSet {
        // INVARIANT: `sets` follows `PasswordKind::ALL`, which is declaration order.
        &self.sets[kind as usize]
    }

    /// Alphabet for a raw tag byte.
    ///
    /// # Errors
    ///
    /// `GenerationError::UnknownType` if the tag names no kind.
    pub fn resolve(&self, tag: u8) -> Result<&CharacterSet, GenerationError> {
        PasswordKind::from_tag(tag)
            .map(|kind| self.get(kind))
            .ok_or(GenerationError::UnknownType(tag))
    }

    /// All sets in tag-table order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterSet> {
        self.sets.iter()
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn symbols_for(kind: PasswordKind) -> &'static [u8] {
    match kind {
        PasswordKind::Numeric => NUMERIC,
        PasswordKind::Alphabetic => ALPHABETIC,
        PasswordKind::Mixed => MIXED,
        PasswordKind::Secure => SECURE,
        PasswordKind::Unambiguous => UNAMBIGUOUS,
    }
}
