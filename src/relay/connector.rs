//! Backend connector: one TCP round trip per command.
//!
//! # Responsibilities
//! - Connect to the backend, write the phrase line, await one reply chunk
//! - Enforce the reply deadline, armed at connection success
//! - Guarantee the socket closes on every terminal outcome
//!
//! # Design Decisions
//! - The protocol is one-shot: one write, one read, tear down. There is no
//!   length prefix and no delimiter scanning; the first readable chunk is
//!   the complete answer, because the backend answers with a single
//!   `sendall` and the phrase fits one segment
//! - Connect failures surface immediately as `ConnectionError`, no retry
//! - The session future owns the stream, so cancellation (e.g. the HTTP
//!   client going away) also closes the socket via drop

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::relay::BackendTarget;

/// Upper bound on a single reply chunk.
const REPLY_BUF_SIZE: usize = 64 * 1024;

/// Terminal outcome of one backend round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The backend answered; bytes are verbatim, untrimmed.
    Reply(Vec<u8>),
    /// The deadline elapsed before any data arrived.
    Timeout,
    /// Connect, write, or read failed, or the backend closed without data.
    ConnectionError,
}

/// Send one command phrase and await one reply.
///
/// Drives the session's connection through its whole lifecycle:
/// connect, write `<phrase>\r\n`, await the first inbound chunk bounded by
/// `deadline`, close. The stream is scoped to this function, so it is
/// closed exactly once on every return path.
pub async fn send(
    target: &BackendTarget,
    port: u16,
    phrase: &str,
    deadline: Duration,
) -> Outcome {
    // Connecting
    let mut stream = match TcpStream::connect((target.host.as_str(), port)).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(
                host = %target.host,
                port,
                error = %e,
                "Cannot connect to control service"
            );
            return Outcome::ConnectionError;
        }
    };

    // One write: the phrase with its CRLF line terminator.
    let mut line = Vec::with_capacity(phrase.len() + 2);
    line.extend_from_slice(phrase.as_bytes());
    line.extend_from_slice(b"\r\n");
    if let Err(e) = stream.write_all(&line).await {
        tracing::error!(host = %target.host, port, error = %e, "Write to control service failed");
        return Outcome::ConnectionError;
    }

    // AwaitingReply: deadline armed from connection success, one read.
    let mut buf = vec![0u8; REPLY_BUF_SIZE];
    match tokio::time::timeout(deadline, stream.read(&mut buf)).await {
        Ok(Ok(0)) => {
            tracing::warn!(host = %target.host, port, "Control service closed without replying");
            Outcome::ConnectionError
        }
        Ok(Ok(n)) => {
            buf.truncate(n);
            Outcome::Reply(buf)
        }
        Ok(Err(e)) => {
            tracing::error!(host = %target.host, port, error = %e, "Read from control service failed");
            Outcome::ConnectionError
        }
        Err(_elapsed) => {
            tracing::warn!(
                host = %target.host,
                port,
                command = %phrase,
                deadline_ms = deadline.as_millis() as u64,
                "Control service reply deadline elapsed"
            );
            Outcome::Timeout
        }
    }
}
