//! Client session tests over loopback UDP.
//!
//! A plain socket stands in for the server so each test controls exactly
//! what is answered. The session and the fake server run concurrently on the
//! test's single thread through `tokio::join!`.

use std::io;

use passgen_client::{ClientError, ClientSession, ExchangeState, HELP, PROMPT, resolve_server};
use passgen_proto::{FAILURE_MARKER, PasswordKind, PasswordRequest};
use tokio::net::UdpSocket;

async fn pair() -> (ClientSession<UdpSocket>, UdpSocket) {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let session = ClientSession::new(socket, server.local_addr().unwrap());
    (session, server)
}

/// Answer one request with `reply`, returning the request bytes.
async fn answer_once(server: &UdpSocket, reply: &[u8]) -> Vec<u8> {
    let mut buf = [0u8; 64];
    let (len, from) = server.recv_from(&mut buf).await.unwrap();
    server.send_to(reply, from).await.unwrap();
    buf[..len].to_vec()
}

fn assert_nothing_sent(server: &UdpSocket) {
    let mut buf = [0u8; 64];
    let err = server.try_recv_from(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
}

#[tokio::test]
async fn valid_command_prints_password() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    let (result, request) = tokio::join!(
        session.run(&b"n 8\nq\n"[..], &mut output),
        answer_once(&server, b"40718293")
    );

    result.unwrap();
    assert_eq!(request, PasswordRequest::new(PasswordKind::Numeric, 8).to_bytes().to_vec());

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Request sent: type = n, length = 8"));
    assert!(output.contains("Password received: 40718293"));
    assert_eq!(output.matches(PROMPT).count(), 2);
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn rejected_input_sends_nothing() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    session.run(&b"x 8\nn 40\nn8\nabcdefgh\nq\n"[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Error: unknown password type 'x'"));
    assert!(output.contains("Error: length 40 out of range: must be between 6 and 32"));
    assert!(output.contains("Error: missing space between type and length"));
    assert!(output.contains("Error: input too long: at most 4 characters"));
    assert_eq!(output.matches(PROMPT).count(), 5);
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn quit_sends_nothing() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    session.run(&b"q\nn 8\n"[..], &mut output).await.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn end_of_input_quits() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    session.run(&b""[..], &mut output).await.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn help_shows_help_text() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    session.run(&b"h\nq\n"[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, format!("{PROMPT}{HELP}{PROMPT}"));
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn overlong_line_without_newline_is_rejected() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();
    let input = vec![b'x'; 1 << 20];

    session.run(&input[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, format!("{PROMPT}Error: input too long: at most 4 characters\n{PROMPT}"));
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn overlong_lines_do_not_swallow_next_command() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();
    let mut input = vec![b'n'; 1 << 20];
    input.push(b'\n');
    input.push(b'h');
    input.extend(vec![b' '; 1 << 16]);
    input.extend_from_slice(b"\nq\n");

    session.run(&input[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Error: input too long"));
    assert!(output.contains(HELP));
    assert_eq!(output.matches(PROMPT).count(), 3);
    assert_nothing_sent(&server);
}

#[tokio::test]
async fn send_failure_ends_session() {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut session = ClientSession::new(socket, "[::1]:57015".parse().unwrap());
    let mut output = Vec::new();

    let result = session.run(&b"n 8\nn 9\nq\n"[..], &mut output).await;

    assert!(matches!(result, Err(ClientError::Transport(_))), "{result:?}");
    assert!(matches!(session.exchange_state(), ExchangeState::Failed(_)));

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, PROMPT);
    assert!(!output.contains("Request sent"));
}

#[tokio::test]
async fn failure_marker_is_reported_not_displayed() {
    let (mut session, server) = pair().await;
    let mut output = Vec::new();

    let (result, _) = tokio::join!(
        session.run(&b"s 10\nq\n"[..], &mut output),
        answer_once(&server, FAILURE_MARKER.as_bytes())
    );

    result.unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Error: server could not generate a password"));
    assert!(!output.contains("Password received"));
}

#[tokio::test]
async fn request_returns_response() {
    let (mut session, server) = pair().await;
    let request = PasswordRequest::new(PasswordKind::Alphabetic, 6);

    let (response, _) = tokio::join!(session.request(request), answer_once(&server, b"qwerty"));

    assert_eq!(response.unwrap(), passgen_proto::PasswordResponse::Password("qwerty".to_string()));
}

#[tokio::test]
async fn resolve_numeric_address() {
    let addr = resolve_server("127.0.0.1", 57015).await.unwrap();

    assert_eq!(addr, "127.0.0.1:57015".parse().unwrap());
}

#[tokio::test]
async fn resolve_failure_is_fatal() {
    let result = resolve_server("passgen.invalid", 57015).await;

    assert!(matches!(result, Err(ClientError::Resolve { .. })));
}
