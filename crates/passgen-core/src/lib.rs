//! Password generation engine.
//!
//! Pure logic with no I/O of its own. Everything with state or side effects is
//! passed in explicitly:
//!
//! - [`CharsetRegistry`]: the five immutable alphabets, built once and shared
//! - [`PasswordGenerator`]: draws symbols from a registry using an injected RNG
//! - [`seed_rng`]: builds the process-wide RNG from a [`SeedSource`]
//! - [`DatagramSocket`]: the seam between runtimes and the network, so the
//!   same server and client loops run on real UDP and in simulation
//!
//! # Randomness
//!
//! The default seed is the wall-clock time in whole seconds. That makes every
//! password predictable to anyone who knows roughly when the server started,
//! so the output must not be treated as a secure credential.
//! [`SeedSource::Os`] removes the predictable seed but keeps the same
//! generator.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod charset;
mod entropy;
pub mod error;
mod generator;
mod socket;

pub use charset::{CharacterSet, CharsetRegistry};
pub use entropy::{SeedSource, seed_rng};
pub use error::{EntropyError, GenerationError};
pub use generator::{GeneratedPassword, PasswordGenerator};
pub use socket::DatagramSocket;
