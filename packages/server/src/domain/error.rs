//! Domain errors.

use thiserror::Error;

/// Errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Display name must not be empty
    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    /// Message content must not be empty
    #[error("Message content cannot be empty")]
    EmptyMessageContent,
}

/// Errors raised by repositories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The connection is already present in the registry.
    ///
    /// Connection ids are generated per accepted socket, so this is an
    /// invariant violation rather than a user error.
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    /// The connection is not (or no longer) present in the registry
    #[error("Session for connection '{0}' not found")]
    SessionNotFound(String),
}

/// Errors raised while pushing frames to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the client
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
