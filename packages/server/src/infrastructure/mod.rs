//! Infrastructure layer
//!
//! Concrete implementations of the domain interfaces (in-memory repositories,
//! channel-backed message pusher) plus the wire protocol (DTOs and codec).

pub mod codec;
pub mod dto;
pub mod message_pusher;
pub mod repository;
