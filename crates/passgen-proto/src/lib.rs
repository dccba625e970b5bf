//! Wire protocol for the password generator.
//!
//! Both peers compile against this crate, so the request layout is defined
//! exactly once:
//!
//! ```text
//! +-----+---------------------+
//! | tag | length (u32, BE)    |
//! +-----+---------------------+
//!   1B          4B              = 5 bytes, no padding
//! ```
//!
//! The response is the raw bytes of the generated password. Datagram
//! boundaries carry its length; there is no terminator on the wire.
//!
//! # Components
//!
//! - [`PasswordKind`]: closed set of generation tags
//! - [`PasswordRequest`]: validated `(kind, length)` pair and its codec
//! - [`PasswordResponse`]: client-side view of a response datagram

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod kind;
mod request;
mod response;

pub use errors::{ProtocolError, Result};
pub use kind::PasswordKind;
pub use request::PasswordRequest;
pub use response::{FAILURE_MARKER, PasswordResponse};

/// Well-known UDP port the server listens on.
pub const DEFAULT_PORT: u16 = 57015;

/// Largest response datagram the client accepts.
///
/// Leaves headroom over both the longest password and [`FAILURE_MARKER`].
pub const MAX_RESPONSE_SIZE: usize = 64;
