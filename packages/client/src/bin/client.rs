//! Interactive chat client.
//!
//! Connects to the chat server, prints every line the server sends and turns
//! prompt input (`COMMAND [data]` or a menu number) into requests.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client
//! cargo run --bin irori-client -- --addr 127.0.0.1:3000
//! ```

use clap::Parser;

use irori_client::run_client_session;
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-client")]
#[command(about = "Interactive client for the Irori chat server", long_about = None)]
struct Args {
    /// Server address
    #[arg(short = 'a', long, default_value = "127.0.0.1:8080")]
    addr: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (quiet by default so logs do not interleave with the prompt)
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.addr).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
