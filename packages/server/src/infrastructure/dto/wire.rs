//! Wire records of the line-delimited chat protocol.
//!
//! Every line on the connection is one JSON object. Clients send [`Request`]s;
//! the server answers every request with exactly one [`Response`] and may
//! also send unsolicited responses (welcome, broadcast notifications).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol command. Matching is case-sensitive.
///
/// Unrecognised names are preserved in [`Command::Other`] so that a record
/// with an unknown command still decodes and is rejected by validation.
/// Commands are built from their wire name, so `Other` never holds a known one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Command {
    /// Echo back the data (for testing)
    Echo,
    /// Register a display name
    Register,
    /// Send a chat message
    Message,
    /// Get list of online users
    ListUsers,
    /// Get list of recent messages
    ListMessages,
    /// Get server time
    Time,
    /// Disconnect from server
    Quit,
    Other(UnknownCommandName),
}

/// Name of a command the server does not understand
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownCommandName(String);

impl UnknownCommandName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Command {
    /// Every command the server understands, in menu order
    pub const KNOWN: [Command; 7] = [
        Command::Register,
        Command::Message,
        Command::ListUsers,
        Command::Echo,
        Command::Time,
        Command::ListMessages,
        Command::Quit,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Command::Echo => "ECHO",
            Command::Register => "REGISTER",
            Command::Message => "MESSAGE",
            Command::ListUsers => "LIST_USERS",
            Command::ListMessages => "LIST_MESSAGES",
            Command::Time => "TIME",
            Command::Quit => "QUIT",
            Command::Other(name) => name.as_str(),
        }
    }

    /// Commands that are rejected when `data` is empty
    pub fn requires_data(&self) -> bool {
        matches!(self, Command::Echo | Command::Register | Command::Message)
    }
}

impl From<&str> for Command {
    fn from(value: &str) -> Self {
        match value {
            "ECHO" => Command::Echo,
            "REGISTER" => Command::Register,
            "MESSAGE" => Command::Message,
            "LIST_USERS" => Command::ListUsers,
            "LIST_MESSAGES" => Command::ListMessages,
            "TIME" => Command::Time,
            "QUIT" => Command::Quit,
            other => Command::Other(UnknownCommandName(other.to_string())),
        }
    }
}

impl From<String> for Command {
    fn from(value: String) -> Self {
        match Command::from(value.as_str()) {
            Command::Other(_) => Command::Other(UnknownCommandName(value)),
            known => known,
        }
    }
}

impl From<Command> for String {
    fn from(value: Command) -> Self {
        match value {
            Command::Other(name) => name.0,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a well-formed request is rejected before dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("Command {0} requires data")]
    MissingData(Command),
}

/// Client-to-server record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub data: String,
    /// Ignored on input; the server uses the session's display name
    #[serde(default)]
    pub from: String,
}

impl Request {
    pub fn new(command: Command, data: impl Into<String>) -> Self {
        Self {
            command,
            data: data.into(),
            from: String::new(),
        }
    }

    /// Check the command is known and carries data when it needs to
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.command {
            Command::Other(name) if name.as_str().is_empty() => {
                Err(ValidationError::EmptyCommand)
            }
            Command::Other(name) => Err(ValidationError::UnknownCommand(name.as_str().to_string())),
            command if command.requires_data() && self.data.is_empty() => {
                Err(ValidationError::MissingData(command.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Server-to-client record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: String,
}

impl Response {
    pub fn new(success: bool, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: data.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(true, message, "")
    }

    pub fn success_with_data(message: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(true, message, data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, "")
    }
}
