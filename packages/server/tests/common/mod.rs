//! Shared helpers for server integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use irori_server::{
    config::ServerConfig,
    infrastructure::{
        codec::{decode_response, encode_request},
        dto::{Command, Request, Response},
        message_pusher::ChannelMessagePusher,
        repository::{InMemoryHistoryRepository, InMemorySessionRepository},
    },
    ui::{AppState, Server},
};
use irori_shared::time::SystemClock;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::oneshot,
    task::JoinHandle,
    time::{Instant, timeout, timeout_at},
};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// In-process server bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::new("127.0.0.1:0")).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryHistoryRepository::new()),
            Arc::new(ChannelMessagePusher::new()),
            Arc::new(SystemClock),
        ));
        let server = Server::bind(config, state)
            .await
            .expect("Failed to bind test server");
        let addr = server.local_addr().expect("Failed to read local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(server.run(async move {
            let _ = shutdown_rx.await;
        }));

        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Trigger graceful shutdown and wait until every worker is gone
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            timeout(Duration::from_secs(5), handle)
                .await
                .expect("Server did not shut down in time")
                .expect("Server task panicked");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Raw line-protocol client
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect and consume the welcome line
    pub async fn connect(addr: SocketAddr) -> Self {
        let mut client = Self::connect_raw(addr).await;
        let welcome = client.recv().await;
        assert!(welcome.success);
        assert_eq!(welcome.message, "Welcome to Irori chat server!");
        client
    }

    pub async fn connect_raw(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        let (reader, writer) = stream.into_split();
        TestClient {
            reader: BufReader::new(reader),
            writer,
        }
    }

    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.try_send_raw(bytes)
            .await
            .expect("Failed to write to server");
    }

    pub async fn try_send_raw(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(bytes).await
    }

    pub async fn send(&mut self, command: &str, data: &str) {
        let frame = encode_request(&Request::new(Command::from(command), data))
            .expect("Failed to encode request");
        self.send_raw(&frame).await;
    }

    /// Next response line, failing the test after `RECV_TIMEOUT`
    pub async fn recv(&mut self) -> Response {
        let mut line = String::new();
        let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("Timed out waiting for a response")
            .expect("Failed to read from server");
        assert!(read > 0, "Connection closed while waiting for a response");
        decode_response(line.as_bytes()).expect("Server sent an undecodable line")
    }

    pub async fn request(&mut self, command: &str, data: &str) -> Response {
        self.send(command, data).await;
        self.recv().await
    }

    /// Asserts the server closes the connection without sending anything else
    pub async fn expect_closed(&mut self) {
        let mut line = String::new();
        let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("Timed out waiting for the server to close the connection");
        match read {
            Ok(0) | Err(_) => {}
            Ok(_) => panic!("Expected the connection to be closed, got line: {line}"),
        }
    }

    /// Asserts nothing arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) {
        let mut line = String::new();
        if let Ok(read) = timeout(wait, self.reader.read_line(&mut line)).await {
            panic!("Expected no traffic, got {read:?}: {line}");
        }
    }

    /// Reads and discards everything until the server closes the connection
    pub async fn drain_until_closed(&mut self, wait: Duration) {
        let deadline = Instant::now() + wait;
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            let read = timeout_at(deadline, self.reader.read(&mut buf))
                .await
                .expect("Timed out waiting for the server to close the connection");
            match read {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
        }
    }
}
