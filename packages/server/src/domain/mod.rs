//! Domain layer
//!
//! Value objects, entities and the interfaces (traits) that the use case layer
//! depends on. Concrete implementations live in the infrastructure layer.

pub mod entity;
pub mod error;
pub mod factory;
pub mod history;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{HistoryEntry, Session, SessionState};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use history::{HISTORY_CAPACITY, MessageHistory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{HistoryRepository, SessionRepository};
pub use value_object::{ConnectionId, DisplayName, MessageContent, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
