//! TCP chat server: listener, connection workers and command dispatch.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ServerError;
pub use handler::{DispatchOutcome, Disposition, dispatch};
pub use server::Server;
pub use signal::shutdown_signal;
pub use state::AppState;
