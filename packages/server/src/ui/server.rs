//! Listener: accepts connections and spawns one worker per connection.

use std::{future::Future, net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::config::ServerConfig;

use super::{error::ServerError, handler::handle_connection, state::AppState};

/// TCP chat server
///
/// Owns the listener and the shared [`AppState`]. Binding and running are
/// separate steps so callers (tests in particular) can bind to port 0 and read
/// the actual address before serving.
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(ServerConfig::default(), state).await?;
/// server.run(shutdown_signal()).await;
/// ```
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Bind the listener to `config.listen_addr`
    pub async fn bind(config: ServerConfig, state: Arc<AppState>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.listen_addr.clone(),
                source,
            })?;

        Ok(Self {
            listener,
            state,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// On shutdown the listener is closed first, then every live connection is
    /// told to close, and this returns once all workers have torn down.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let Server {
            listener,
            state,
            config,
        } = self;

        match listener.local_addr() {
            Ok(addr) => tracing::info!("Chat server listening on {}", addr),
            Err(e) => tracing::warn!("Chat server listening (local address unknown: {})", e),
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let token = CancellationToken::new();
        let tracker = TaskTracker::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::debug!("Accepted connection from {}", peer);
                        tracker.spawn(handle_connection(
                            stream,
                            peer,
                            state.clone(),
                            config.clone(),
                            token.clone(),
                        ));
                    }
                    Err(e) => {
                        // Accept failures affect only the pending connection
                        tracing::warn!("Failed to accept connection: {}", e);
                    }
                },
            }
        }

        drop(listener);
        tracing::info!(
            "Stopped accepting, closing {} connection(s)",
            tracker.len()
        );
        token.cancel();
        tracker.close();
        tracker.wait().await;

        tracing::info!("Server shutdown complete");
    }
}
