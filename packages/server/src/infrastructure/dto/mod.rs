//! Data Transfer Objects (DTOs) for the chat application.
//!
//! - `wire`: request / response records exchanged over the TCP connection

pub mod wire;

pub use wire::{Command, Request, Response, UnknownCommandName, ValidationError};
