//! Per-connection handlers.

mod command;
mod connection;

pub use command::{DispatchOutcome, Disposition, dispatch};
pub(crate) use connection::handle_connection;
