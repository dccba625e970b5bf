//! Fuzz target for the server driver
//!
//! Feeds a sequence of arbitrary datagrams through one driver, as a hostile
//! or broken peer would.
//!
//! # Invariants
//!
//! - The driver never panics
//! - At most one reply per datagram, always to the sender
//! - Malformed datagrams get no reply
//! - Replies never exceed the client's receive buffer

#![no_main]

use std::net::SocketAddr;

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use passgen_core::{CharsetRegistry, PasswordGenerator};
use passgen_proto::{MAX_RESPONSE_SIZE, PasswordRequest};
use passgen_server::{ServerAction, ServerDriver, ServerEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Arbitrary)]
struct Input {
    seed: u64,
    datagrams: Vec<Datagram>,
}

#[derive(Debug, Arbitrary)]
struct Datagram {
    port: u16,
    payload: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let generator =
        PasswordGenerator::new(CharsetRegistry::new(), ChaCha8Rng::seed_from_u64(input.seed));
    let mut driver = ServerDriver::new(generator);

    for datagram in input.datagrams {
        let from = SocketAddr::from(([10, 0, 0, 1], datagram.port));
        let well_formed = PasswordRequest::decode(&datagram.payload).is_ok();

        let actions = driver.process_event(ServerEvent::DatagramReceived {
            from,
            payload: Bytes::from(datagram.payload),
        });

        let replies: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                ServerAction::SendDatagram { to, payload } => Some((*to, payload.len())),
                ServerAction::Log { .. } => None,
            })
            .collect();

        assert_eq!(replies.len(), usize::from(well_formed));
        for (to, len) in replies {
            assert_eq!(to, from);
            assert!(len <= MAX_RESPONSE_SIZE);
        }
    }
});
