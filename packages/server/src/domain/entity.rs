//! Entities.

use irori_shared::time::timestamp_to_clock_time;

use super::value_object::{ConnectionId, DisplayName, MessageContent, Timestamp};

/// Registration state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, still using the default display name
    Unregistered,
    /// A REGISTER command has succeeded at least once
    Registered,
}

/// Per-connection identity tracked by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub state: SessionState,
    pub connected_at: Timestamp,
}

impl Session {
    /// Create a fresh, unregistered session named "anonymous"
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            name: DisplayName::anonymous(),
            state: SessionState::Unregistered,
            connected_at,
        }
    }

    /// Change the display name. Registering again while registered simply
    /// replaces the name.
    pub fn rename(&mut self, name: DisplayName) {
        self.name = name;
        self.state = SessionState::Registered;
    }

    pub fn is_registered(&self) -> bool {
        self.state == SessionState::Registered
    }
}

/// One stored chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sender: DisplayName,
    pub content: MessageContent,
    pub sent_at: Timestamp,
}

impl HistoryEntry {
    pub fn new(sender: DisplayName, content: MessageContent, sent_at: Timestamp) -> Self {
        Self {
            sender,
            content,
            sent_at,
        }
    }

    /// Render as `[HH:MM:SS] sender: content`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            timestamp_to_clock_time(self.sent_at.value()),
            self.sender.as_str(),
            self.content.as_str()
        )
    }
}
