//! End-to-end scenarios on a simulated network.
//!
//! Each test runs the real server runtime on one turmoil host and a scripted
//! client session on another. The simulation ends when the client finishes.

use passgen_client::{HELP, PROMPT};
use passgen_core::{CharsetRegistry, DatagramSocket};
use passgen_harness::{SimSocket, add_server, client_bind_addr, run_client_script, server_addr};
use passgen_proto::{MAX_RESPONSE_SIZE, PasswordKind, PasswordRequest, PasswordResponse};
use proptest::prelude::*;

#[test]
fn numeric_request_end_to_end() {
    let outcome = run_client_script(1, b"n 8\nq\n").unwrap();

    assert!(outcome.output.contains("Request sent: type = n, length = 8"));
    assert_eq!(outcome.datagrams_sent, 1);

    let passwords = outcome.passwords();
    assert_eq!(passwords.len(), 1);
    assert_eq!(passwords[0].len(), 8);
    assert!(passwords[0].bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn secure_request_end_to_end() {
    let outcome = run_client_script(2, b"s 10\nq\n").unwrap();

    let registry = CharsetRegistry::new();
    let passwords = outcome.passwords();
    assert_eq!(passwords.len(), 1);
    assert_eq!(passwords[0].len(), 10);
    assert!(passwords[0].bytes().all(|b| registry.get(PasswordKind::Secure).contains(b)));
}

#[test]
fn unknown_type_is_rejected_locally() {
    let outcome = run_client_script(3, b"x 8\nq\n").unwrap();

    assert!(outcome.output.contains("Error: unknown password type 'x'"));
    assert_eq!(outcome.datagrams_sent, 0);
    assert!(outcome.passwords().is_empty());
}

#[test]
fn out_of_range_length_is_rejected_locally() {
    let outcome = run_client_script(4, b"n 40\nn 5\nq\n").unwrap();

    assert_eq!(outcome.datagrams_sent, 0);
    assert_eq!(outcome.output.matches("out of range").count(), 2);
}

#[test]
fn quit_sends_nothing() {
    let outcome = run_client_script(5, b"q\n").unwrap();

    assert_eq!(outcome.datagrams_sent, 0);
    assert_eq!(outcome.output, PROMPT);
}

#[test]
fn help_then_request() {
    let outcome = run_client_script(6, b"h\nu 12\nq\n").unwrap();

    assert!(outcome.output.contains(HELP));
    assert_eq!(outcome.datagrams_sent, 1);

    let registry = CharsetRegistry::new();
    let passwords = outcome.passwords();
    assert_eq!(passwords[0].len(), 12);
    assert!(passwords[0].bytes().all(|b| registry.get(PasswordKind::Unambiguous).contains(b)));
}

#[test]
fn consecutive_requests_get_distinct_passwords() {
    let outcome = run_client_script(7, b"m 32\nm 32\nm 32\nq\n").unwrap();

    let passwords = outcome.passwords();
    assert_eq!(outcome.datagrams_sent, 3);
    assert_eq!(passwords.len(), 3);
    assert_ne!(passwords[0], passwords[1]);
    assert_ne!(passwords[1], passwords[2]);
}

#[test]
fn same_seed_same_passwords() {
    let first = run_client_script(8, b"s 16\na 16\nq\n").unwrap();
    let second = run_client_script(8, b"s 16\na 16\nq\n").unwrap();

    assert_eq!(first.passwords(), second.passwords());
}

#[test]
fn malformed_datagram_gets_no_reply_and_server_survives() {
    let mut sim = turmoil::Builder::new().build();
    add_server(&mut sim, 9);

    sim.client("client", async {
        let socket = SimSocket::bind(client_bind_addr()).await?;
        let server = server_addr();

        // Three bytes, an unknown tag, and a padded request: all dropped
        socket.send_to(&[b'n', 0, 8], server).await?;
        socket.send_to(&[b'x', 0, 0, 0, 8], server).await?;
        socket.send_to(&[b'n', 0, 0, 0, 8, 0, 0, 0], server).await?;

        let request = PasswordRequest::new(PasswordKind::Alphabetic, 6);
        socket.send_to(&request.to_bytes(), server).await?;

        // The only reply is the answer to the well-formed request
        let mut buf = [0u8; MAX_RESPONSE_SIZE];
        let (len, _) = socket.recv_from(&mut buf).await?;
        let PasswordResponse::Password(password) = PasswordResponse::from_bytes(&buf[..len]) else {
            return Err("expected a password, got the failure marker".into());
        };

        assert_eq!(password.len(), 6);
        assert!(password.bytes().all(|b| b.is_ascii_lowercase()));
        Ok(())
    });

    sim.run().unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every valid command comes back as a password of the requested kind
    /// and length.
    #[test]
    fn prop_valid_commands_round_trip(
        kind in proptest::sample::select(PasswordKind::ALL.to_vec()),
        length in PasswordRequest::MIN_LENGTH..=PasswordRequest::MAX_LENGTH,
        seed in any::<u64>(),
    ) {
        let script = format!("{} {length}\nq\n", char::from(kind.tag()));

        let outcome = run_client_script(seed, script.as_bytes()).unwrap();
        let registry = CharsetRegistry::new();
        let passwords = outcome.passwords();

        prop_assert_eq!(outcome.datagrams_sent, 1);
        prop_assert_eq!(passwords.len(), 1);
        prop_assert_eq!(passwords[0].len(), length as usize);
        prop_assert!(passwords[0].bytes().all(|b| registry.get(kind).contains(b)));
    }
}
