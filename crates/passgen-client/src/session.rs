//! Client session runtime.
//!
//! Reads commands, runs them through the [`Validator`] and performs one
//! [`Exchange`] per accepted request. Everything is sequential: while a
//! request is outstanding the session does nothing but wait for its answer,
//! with no timeout.

use std::{
    collections::VecDeque,
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};

use passgen_core::DatagramSocket;
use passgen_proto::{MAX_RESPONSE_SIZE, PasswordRequest, PasswordResponse};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    net::UdpSocket,
};

use crate::{
    ClientConfig, ClientError, Exchange, ExchangeState, HELP, MAX_INPUT_CHARS, PROMPT, RawLine,
    Validator, ValidatorAction, ValidatorEvent, resolve_server,
};

/// Bytes of one input line kept for validation.
///
/// Room for [`MAX_INPUT_CHARS`] + 1 characters of up to four bytes each and a
/// carriage return. Anything past this is consumed and dropped.
const LINE_CAPTURE_BYTES: usize = 4 * (MAX_INPUT_CHARS + 1) + 1;

/// One interactive client talking to one server.
pub struct ClientSession<S> {
    socket: S,
    server: SocketAddr,
    exchange: Exchange,
}

impl ClientSession<UdpSocket> {
    /// Resolve the server and bind an ephemeral local socket.
    ///
    /// Resolution happens once; a failure here is fatal.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let server = resolve_server(&config.host, config.port).await?;

        let local: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| ClientError::Transport(format!("failed to bind {local}: {e}")))?;

        tracing::info!(%server, "client ready");

        Ok(Self::new(socket, server))
    }
}

impl<S: DatagramSocket> ClientSession<S> {
    /// Create a session over a bound socket and a resolved server address.
    pub fn new(socket: S, server: SocketAddr) -> Self {
        Self { socket, server, exchange: Exchange::new() }
    }

    /// State of the current (or last) exchange.
    pub fn exchange_state(&self) -> &ExchangeState {
        self.exchange.state()
    }

    /// Send one request and wait for its response.
    pub async fn request(
        &mut self,
        request: PasswordRequest,
    ) -> Result<PasswordResponse, ClientError> {
        self.send(request).await?;
        self.receive().await
    }

    /// Interactive loop.
    ///
    /// Returns `Ok` when the user quits or `input` ends. Transport failures
    /// end the loop with an error; there is no retry.
    pub async fn run<I, W>(&mut self, mut input: I, output: &mut W) -> Result<(), ClientError>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut validator = Validator::new();
        let mut pending: VecDeque<ValidatorAction> = validator.start().into();

        loop {
            while let Some(action) = pending.pop_front() {
                match action {
                    ValidatorAction::ShowPrompt => {
                        write!(output, "{PROMPT}")?;
                        output.flush()?;
                    },
                    ValidatorAction::ShowHelp => write!(output, "{HELP}")?,
                    ValidatorAction::ShowError(err) => writeln!(output, "Error: {err}")?,
                    ValidatorAction::Submit(request) => {
                        self.send(request).await?;
                        writeln!(
                            output,
                            "Request sent: type = {}, length = {}",
                            char::from(request.kind.tag()),
                            request.length
                        )?;
                        output.flush()?;

                        match self.receive().await? {
                            PasswordResponse::Password(password) => {
                                writeln!(output, "Password received: {password}")?;
                            },
                            PasswordResponse::Failed => {
                                writeln!(output, "Error: server could not generate a password")?;
                            },
                        }

                        pending.extend(validator.start());
                    },
                    ValidatorAction::Quit => {
                        output.flush()?;
                        return Ok(());
                    },
                }
            }

            let event = match read_line(&mut input).await? {
                Some(line) => ValidatorEvent::Line(line),
                None => ValidatorEvent::EndOfInput,
            };
            pending.extend(validator.handle(event));
        }
    }

    async fn send(&mut self, request: PasswordRequest) -> Result<(), ClientError> {
        let payload = self.exchange.begin(request)?;

        if let Err(e) = self.socket.send_to(&payload, self.server).await {
            self.exchange.fail(e.to_string());
            return Err(ClientError::Transport(format!("send to {} failed: {e}", self.server)));
        }

        self.exchange.sent()?;
        tracing::info!(
            server = %self.server,
            kind = %request.kind,
            length = request.length,
            "request sent"
        );
        Ok(())
    }

    async fn receive(&mut self) -> Result<PasswordResponse, ClientError> {
        let mut buf = [0u8; MAX_RESPONSE_SIZE];

        let (len, from) = match self.socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                self.exchange.fail(e.to_string());
                return Err(ClientError::Transport(format!("receive failed: {e}")));
            },
        };

        if from != self.server {
            tracing::debug!(%from, server = %self.server, "response from unexpected address");
        }

        let response = self.exchange.received(&buf[..len])?;
        tracing::info!(bytes = len, "response received");
        Ok(response)
    }
}

/// Read one line, keeping at most [`LINE_CAPTURE_BYTES`] of it.
///
/// The rest of an overlong line is skipped through the reader's buffer
/// without being stored. Returns `None` at end of input.
async fn read_line<I>(input: &mut I) -> io::Result<Option<RawLine>>
where
    I: AsyncBufRead + Unpin,
{
    let mut kept = Vec::with_capacity(LINE_CAPTURE_BYTES);
    let mut overflowed = false;
    let mut read_any = false;

    loop {
        let (used, done) = {
            let available = input.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            read_any = true;

            let (body, used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (&available[..end], end + 1, true),
                None => (available, available.len(), false),
            };

            let room = LINE_CAPTURE_BYTES - kept.len();
            if body.len() > room {
                overflowed = true;
            }
            kept.extend_from_slice(&body[..body.len().min(room)]);

            (used, done)
        };

        input.consume(used);
        if done {
            break;
        }
    }

    Ok(read_any.then(|| RawLine::from_prefix(&kept, overflowed)))
}
