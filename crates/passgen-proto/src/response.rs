//! Response datagrams.
//!
//! A response carries either the password symbols or, when the server could
//! not generate one, the fixed [`FAILURE_MARKER`] text. Both travel as raw
//! bytes with no header, so the marker shares the data channel with real
//! passwords. It cannot collide with one because it contains spaces, and no
//! character set includes the space character.

use bytes::Bytes;

/// Payload sent in place of a password when generation fails.
pub const FAILURE_MARKER: &str = "Error, password not generated";

/// Decoded response datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResponse {
    /// Generated password text.
    Password(String),
    /// Server reported that no password could be generated.
    Failed,
}

impl PasswordResponse {
    /// Interpret a received datagram.
    ///
    /// Non-UTF-8 bytes are replaced rather than rejected; every symbol the
    /// server emits is ASCII, so a replacement means a corrupted datagram
    /// and is shown as such.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes == FAILURE_MARKER.as_bytes() {
            return Self::Failed;
        }
        Self::Password(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Wire bytes for this response.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Password(password) => Bytes::copy_from_slice(password.as_bytes()),
            Self::Failed => Bytes::from_static(FAILURE_MARKER.as_bytes()),
        }
    }
}
