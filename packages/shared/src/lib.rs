//! Shared utilities for the Irori chat server and client.

pub mod logger;
pub mod time;
