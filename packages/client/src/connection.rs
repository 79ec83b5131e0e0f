//! TCP connection speaking the line protocol.

use std::time::Duration;

use futures_util::StreamExt;
use irori_server::infrastructure::{
    codec::{decode_response, encode_request, line_framing},
    dto::{Command, Request, Response},
};
use tokio::{
    io::AsyncWriteExt,
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    time::timeout,
};
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};

use crate::error::ClientError;

/// Receiving half: every line is one more [`Response`] (reply, welcome or
/// broadcast alike).
pub struct ResponseReader {
    lines: FramedRead<OwnedReadHalf, AnyDelimiterCodec>,
}

impl ResponseReader {
    /// Next response, or `Err(ConnectionClosed)` once the server has closed
    pub async fn recv(&mut self) -> Result<Response, ClientError> {
        match self.lines.next().await {
            Some(Ok(line)) => Ok(decode_response(&line)?),
            Some(Err(e)) => Err(e.into()),
            None => Err(ClientError::ConnectionClosed),
        }
    }

    pub async fn next_response(&mut self, wait: Duration) -> Result<Response, ClientError> {
        timeout(wait, self.recv())
            .await
            .map_err(|_| ClientError::Timeout)?
    }
}

/// Sending half
pub struct RequestWriter {
    writer: OwnedWriteHalf,
}

impl RequestWriter {
    pub async fn send_request(&mut self, request: &Request) -> Result<(), ClientError> {
        let frame = encode_request(request)?;
        self.writer.write_all(&frame).await?;
        Ok(())
    }

    pub async fn send(&mut self, command: Command, data: &str) -> Result<(), ClientError> {
        self.send_request(&Request::new(command, data)).await
    }
}

/// Connected chat client
pub struct ChatClient {
    reader: ResponseReader,
    writer: RequestWriter,
}

impl ChatClient {
    pub async fn connect(addr: &str) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| ClientError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        tracing::info!("Connected to {}", addr);

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: ResponseReader {
                lines: FramedRead::new(read_half, line_framing()),
            },
            writer: RequestWriter { writer: write_half },
        })
    }

    pub async fn send(&mut self, command: Command, data: &str) -> Result<(), ClientError> {
        self.writer.send(command, data).await
    }

    pub async fn next_response(&mut self, wait: Duration) -> Result<Response, ClientError> {
        self.reader.next_response(wait).await
    }

    /// Send one request and wait for the next line.
    ///
    /// There is no correlation id on the wire: a broadcast arriving first is
    /// returned instead of the reply.
    pub async fn request(
        &mut self,
        command: Command,
        data: &str,
        wait: Duration,
    ) -> Result<Response, ClientError> {
        self.send(command, data).await?;
        self.next_response(wait).await
    }

    pub fn into_split(self) -> (ResponseReader, RequestWriter) {
        (self.reader, self.writer)
    }
}
