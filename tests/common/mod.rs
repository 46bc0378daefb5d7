//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use command_gateway::config::GatewayConfig;
use command_gateway::{HttpServer, Shutdown};

/// How a mock control backend answers each connection.
#[derive(Clone)]
pub enum Behavior {
    /// Read the command line, reply with fixed text.
    Reply(&'static str),
    /// Read the command line, wait, then reply.
    DelayedReply(Duration, &'static str),
    /// Read the command line and never answer.
    Silent,
}

/// Serve the line-oriented control protocol on an already-bound listener.
///
/// Each connection is one command: read a chunk, apply the behavior, close.
pub fn start_control_backend(listener: TcpListener, behavior: Behavior) {
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let behavior = behavior.clone();
                    tokio::spawn(handle_command(socket, behavior));
                }
                Err(_) => break,
            }
        }
    });
}

async fn handle_command(mut socket: TcpStream, behavior: Behavior) {
    let mut buf = vec![0u8; 1024];
    let Ok(n) = socket.read(&mut buf).await else {
        return;
    };
    assert!(
        buf[..n].ends_with(b"\r\n"),
        "command line must be CRLF-terminated"
    );

    match behavior {
        Behavior::Reply(text) => {
            let _ = socket.write_all(text.as_bytes()).await;
        }
        Behavior::DelayedReply(delay, text) => {
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(text.as_bytes()).await;
        }
        Behavior::Silent => {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }
}

/// Bind a (primary, control) listener pair on adjacent loopback ports.
///
/// The gateway derives the control port as primary + 1, so the pair must
/// be adjacent. Ephemeral allocation can hand out a taken neighbor, so
/// retry until both binds succeed.
pub async fn bind_adjacent_pair() -> (TcpListener, TcpListener, u16) {
    for _ in 0..50 {
        let primary = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = primary.local_addr().unwrap().port();
        if port == u16::MAX {
            continue;
        }
        if let Ok(control) = TcpListener::bind(("127.0.0.1", port + 1)).await {
            return (primary, control, port);
        }
    }
    panic!("could not bind an adjacent port pair");
}

/// Spawn a gateway on an ephemeral loopback port.
///
/// Returns the bound address and the shutdown handle that stops it.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown: broadcast::Receiver<()> = shutdown.subscribe();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Let the accept loop come up before tests start firing requests.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Gateway config pointing at the given backend primary port.
pub fn gateway_config(backend_port: u16) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.backend.host = "127.0.0.1".to_string();
    config.backend.port = backend_port;
    config
}

/// A reqwest client that never routes through a proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
