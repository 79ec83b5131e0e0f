//! Connection worker: one task per accepted TCP connection.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::mpsc,
    task::JoinHandle,
    time::timeout,
};
use tokio_util::{codec::FramedRead, sync::CancellationToken};

use crate::{
    config::ServerConfig,
    domain::{ConnectionId, ConnectionIdFactory, PusherChannel},
    infrastructure::{
        codec::{decode_request, encode_response, line_framing},
        dto::Response,
    },
    ui::state::AppState,
};

use super::command::{
    DispatchOutcome, Disposition, INVALID_FORMAT_MESSAGE, WELCOME_MESSAGE, dispatch,
};

/// Encode `response` and put it on the connection's outbound queue.
///
/// Waits for room in the queue, so a client that stops reading also stops
/// being read from. Gives up once the connection is closing.
async fn enqueue(
    tx: &PusherChannel,
    closing: &CancellationToken,
    connection_id: &ConnectionId,
    response: &Response,
) {
    let frame = match encode_response(response) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("Failed to encode response for '{}': {}", connection_id, e);
            return;
        }
    };

    tokio::select! {
        sent = tx.send(frame) => {
            if sent.is_err() {
                tracing::debug!("Writer for '{}' is gone, dropping response", connection_id);
            }
        }
        _ = closing.cancelled() => {
            tracing::debug!("Connection '{}' is closing, dropping response", connection_id);
        }
    }
}

/// Spawns the task that drains the outbound queue into the socket.
///
/// Replies and broadcast notifications share this queue, so lines never
/// interleave. Returns once every sender is dropped (after flushing what is
/// queued) or on the first failed or stalled write, in which case
/// `on_failure` is cancelled so the reader stops as well.
fn pusher_loop(
    mut rx: mpsc::Receiver<Vec<u8>>,
    mut writer: OwnedWriteHalf,
    write_timeout: Duration,
    connection_id: ConnectionId,
    on_failure: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match timeout(write_timeout, writer.write_all(&frame)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Write to '{}' failed: {}", connection_id, e);
                    on_failure.cancel();
                    return;
                }
                Err(_) => {
                    tracing::warn!("Write to '{}' timed out", connection_id);
                    on_failure.cancel();
                    return;
                }
            }
        }

        if let Err(e) = writer.shutdown().await {
            tracing::debug!("Failed to shut down writer for '{}': {}", connection_id, e);
        }
    })
}

/// Serve one connection until QUIT, disconnect, idle timeout, transport
/// failure, a broadcast finding its queue full, or server shutdown.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState>,
    config: Arc<ServerConfig>,
    shutdown: CancellationToken,
) {
    let connection_id = ConnectionIdFactory::generate();
    let (reader, writer) = stream.into_split();
    let connection_token = shutdown.child_token();
    let (tx, rx) = PusherChannel::bounded(config.outbound_capacity, connection_token.clone());

    // Welcome goes first, ahead of any broadcast
    enqueue(
        &tx,
        &connection_token,
        &connection_id,
        &Response::success(WELCOME_MESSAGE),
    )
    .await;

    if let Err(e) = state
        .connect_client_usecase
        .execute(connection_id, tx.clone())
        .await
    {
        tracing::error!("Failed to register connection from {}: {}", peer, e);
        return;
    }
    tracing::info!("Client '{}' connected from {}", connection_id, peer);

    let writer_task = pusher_loop(
        rx,
        writer,
        config.write_timeout,
        connection_id,
        connection_token.clone(),
    );

    let mut lines = FramedRead::new(reader, line_framing());
    loop {
        let next = tokio::select! {
            _ = connection_token.cancelled() => {
                tracing::info!("Closing connection '{}'", connection_id);
                break;
            }
            next = timeout(config.idle_timeout, lines.next()) => next,
        };

        let line = match next {
            Ok(Some(Ok(line))) => line,
            Ok(Some(Err(e))) => {
                tracing::warn!("Read from '{}' failed: {}", connection_id, e);
                break;
            }
            Ok(None) => {
                tracing::info!("Client '{}' closed the connection", connection_id);
                break;
            }
            Err(_) => {
                tracing::warn!(
                    "Client '{}' idle for {:?}, disconnecting",
                    connection_id,
                    config.idle_timeout
                );
                break;
            }
        };

        let outcome = match decode_request(&line) {
            Ok(request) => dispatch(&state, &connection_id, request).await,
            Err(e) => {
                tracing::warn!("Invalid message from '{}': {}", connection_id, e);
                DispatchOutcome::reply(Response::failure(INVALID_FORMAT_MESSAGE))
            }
        };

        match outcome.disposition {
            Disposition::Continue => {
                enqueue(&tx, &connection_token, &connection_id, &outcome.response).await
            }
            Disposition::Close => {
                // Leave the registry first so no broadcast can follow the reply
                state
                    .disconnect_client_usecase
                    .execute(&connection_id)
                    .await;
                enqueue(&tx, &connection_token, &connection_id, &outcome.response).await;
                tracing::info!("Client '{}' quit", connection_id);
                break;
            }
        }
    }

    // 冪等なので QUIT 後に呼んでも問題ない
    if let Some(session) = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await
    {
        tracing::info!(
            "Client '{}' ('{}') disconnected and removed from registry",
            connection_id,
            session.name
        );
    }

    drop(tx);
    if let Err(e) = writer_task.await {
        tracing::error!("Writer task for '{}' failed: {}", connection_id, e);
    }
}
