//! Password request and its wire codec.
//!
//! The codec is explicit field-by-field serialization. Nothing about the
//! in-memory layout of [`PasswordRequest`] (field order, padding, host byte
//! order) reaches the wire.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    PasswordKind,
    errors::{ProtocolError, Result},
};

/// A `(kind, length)` pair ready for transmission.
///
/// Layout on the wire:
/// `[tag: u8] + [length: u32 big endian]`, 5 bytes total.
///
/// # Invariants
///
/// - Requests built by the client validator always satisfy
///   [`Self::has_valid_length`]. A request obtained from [`Self::decode`] only
///   guarantees a known kind; its length is whatever the peer sent and must be
///   checked again before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordRequest {
    /// Requested character class
    pub kind: PasswordKind,
    /// Requested number of symbols
    pub length: u32,
}

impl PasswordRequest {
    /// Size of an encoded request (1 tag byte + 4 length bytes).
    pub const WIRE_SIZE: usize = 5;

    /// Shortest password the client may request.
    pub const MIN_LENGTH: u32 = 6;

    /// Longest password the client may request.
    pub const MAX_LENGTH: u32 = 32;

    /// Create a request. Does not check the length range.
    #[must_use]
    pub const fn new(kind: PasswordKind, length: u32) -> Self {
        Self { kind, length }
    }

    /// Whether `length` lies in `[MIN_LENGTH, MAX_LENGTH]`.
    #[must_use]
    pub const fn is_valid_length(length: u32) -> bool {
        length >= Self::MIN_LENGTH && length <= Self::MAX_LENGTH
    }

    /// Whether this request's length is in range.
    #[must_use]
    pub const fn has_valid_length(&self) -> bool {
        Self::is_valid_length(self.length)
    }

    /// Encode into `dst`, tag first, then the length in network byte order.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u8(self.kind.tag());
        dst.put_u32(self.length);
    }

    /// Encode into a freshly allocated buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::WIRE_SIZE);
        self.encode(&mut buf);
        debug_assert_eq!(buf.len(), Self::WIRE_SIZE);
        buf.freeze()
    }

    /// Decode a request datagram.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::WrongSize` if `bytes` is not exactly
    ///   [`Self::WIRE_SIZE`] long (short and long datagrams alike)
    /// - `ProtocolError::UnknownTag` if the tag byte names no kind
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::WIRE_SIZE {
            return Err(ProtocolError::WrongSize {
                expected: Self::WIRE_SIZE,
                actual: bytes.len(),
            });
        }

        let mut buf = bytes;
        let tag = buf.get_u8();
        let length = buf.get_u32();

        let kind = PasswordKind::from_tag(tag).ok_or(ProtocolError::UnknownTag(tag))?;

        Ok(Self { kind, length })
    }
}
