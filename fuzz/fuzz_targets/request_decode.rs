//! Fuzz target for PasswordRequest::decode
//!
//! Arbitrary datagrams must never panic the decoder.
//!
//! # Invariants
//!
//! - Only exactly 5-byte datagrams decode
//! - A decoded request re-encodes to the same bytes

#![no_main]

use libfuzzer_sys::fuzz_target;
use passgen_proto::PasswordRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = PasswordRequest::decode(data) {
        assert_eq!(data.len(), PasswordRequest::WIRE_SIZE);
        assert_eq!(&request.to_bytes()[..], data);
    }
});
