//! Line-delimited JSON chat server over TCP.
//!
//! Accepts many concurrent connections, lets each connection claim a display
//! name, relays chat lines to every other connected peer and answers
//! on-demand queries (online users, recent history, time, echo).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
