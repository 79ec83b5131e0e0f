//! UseCase layer
//!
//! 状態を変更する操作ごとに 1 つのユースケースを定義します。
//! ユースケースはドメイン層の trait（Repository, MessagePusher）にのみ依存します。

mod connect_client;
mod disconnect_client;
mod error;
mod list_messages;
mod list_users;
mod register_name;
mod send_message;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, RegisterError, SendMessageError};
pub use list_messages::{ListMessagesUseCase, RECENT_MESSAGES_LIMIT};
pub use list_users::ListUsersUseCase;
pub use register_name::RegisterNameUseCase;
pub use send_message::{SendMessageUseCase, SentMessage};
