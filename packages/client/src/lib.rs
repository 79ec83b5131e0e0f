//! Line-delimited JSON chat client.
//!
//! [`ChatClient`] speaks the wire protocol programmatically; the interactive
//! session wraps it with a readline prompt and a display task.

mod connection;
pub mod error;
mod formatter;
mod input;
mod session;
mod ui;

pub use connection::{ChatClient, RequestWriter, ResponseReader};
pub use error::ClientError;
pub use formatter::ResponseFormatter;
pub use input::{UserInput, parse_input};
pub use session::run_client_session;
