//! Password kinds and their single-byte tags.

use std::fmt;

/// Character class requested by the client.
///
/// Each kind is identified on the wire and on the command line by a single
/// ASCII tag. The set is closed: any other tag is rejected by both the client
/// validator and the server decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PasswordKind {
    /// Digits only (`n`).
    Numeric,
    /// Lowercase letters only (`a`).
    Alphabetic,
    /// Lowercase letters and digits (`m`).
    Mixed,
    /// Upper and lowercase letters, digits and punctuation (`s`).
    Secure,
    /// Secure set without look-alike characters (`u`).
    Unambiguous,
}

impl PasswordKind {
    /// All kinds, in tag-table order.
    pub const ALL: [Self; 5] =
        [Self::Numeric, Self::Alphabetic, Self::Mixed, Self::Secure, Self::Unambiguous];

    /// Resolve a tag byte. `None` if the tag names no kind.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'n' => Some(Self::Numeric),
            b'a' => Some(Self::Alphabetic),
            b'm' => Some(Self::Mixed),
            b's' => Some(Self::Secure),
            b'u' => Some(Self::Unambiguous),
            _ => None,
        }
    }

    /// Tag byte used on the wire and on the command line.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Numeric => b'n',
            Self::Alphabetic => b'a',
            Self::Mixed => b'm',
            Self::Secure => b's',
            Self::Unambiguous => b'u',
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphabetic => "alphabetic",
            Self::Mixed => "mixed",
            Self::Secure => "secure",
            Self::Unambiguous => "unambiguous",
        }
    }
}

impl fmt::Display for PasswordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
