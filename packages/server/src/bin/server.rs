//! Line-delimited JSON chat server over TCP.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --addr 0.0.0.0:3000 --idle-timeout-secs 60
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use irori_server::{
    config::{DEFAULT_LISTEN_ADDR, DEFAULT_OUTBOUND_CAPACITY, ServerConfig},
    infrastructure::{
        message_pusher::ChannelMessagePusher,
        repository::{InMemoryHistoryRepository, InMemorySessionRepository},
    },
    ui::{AppState, Server, shutdown_signal},
};
use irori_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "irori-server")]
#[command(about = "Line-delimited JSON chat server over TCP", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short = 'a', long, default_value = DEFAULT_LISTEN_ADDR)]
    addr: String,

    /// Close connections after this many seconds without traffic
    #[arg(long, default_value_t = 300)]
    idle_timeout_secs: u64,

    /// Deadline in seconds for writing one line to a client
    #[arg(long, default_value_t = 10)]
    write_timeout_secs: u64,

    /// Lines a client may leave unread before it is disconnected
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::new(args.addr)
        .with_idle_timeout(Duration::from_secs(args.idle_timeout_secs))
        .with_write_timeout(Duration::from_secs(args.write_timeout_secs))
        .with_outbound_capacity(args.outbound_capacity);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repositories (in-memory)
    let sessions = Arc::new(InMemorySessionRepository::new());
    let history = Arc::new(InMemoryHistoryRepository::new());

    // 2. Create MessagePusher (mpsc channel implementation)
    let message_pusher = Arc::new(ChannelMessagePusher::new());

    // 3. Create UseCases
    let state = Arc::new(AppState::new(
        sessions,
        history,
        message_pusher,
        Arc::new(SystemClock),
    ));

    // 4. Bind and run the server
    let server = match Server::bind(config, state).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };
    server.run(shutdown_signal()).await;
}
