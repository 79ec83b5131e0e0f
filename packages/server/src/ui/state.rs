//! Shared application state.

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::{
    domain::{HistoryRepository, MessagePusher, SessionRepository},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, ListMessagesUseCase, ListUsersUseCase,
        RegisterNameUseCase, SendMessageUseCase,
    },
};

/// Explicitly passed server context. Every `Server` owns its own instance, so
/// independent servers can run side by side in one process.
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// RegisterNameUseCase（表示名登録のユースケース）
    pub register_name_usecase: Arc<RegisterNameUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ListUsersUseCase（ユーザー一覧のユースケース）
    pub list_users_usecase: Arc<ListUsersUseCase>,
    /// ListMessagesUseCase（直近メッセージ取得のユースケース）
    pub list_messages_usecase: Arc<ListMessagesUseCase>,
    /// TIME コマンドで使う時計
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire every use case onto the given repositories and pusher.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                sessions.clone(),
                message_pusher.clone(),
            )),
            register_name_usecase: Arc::new(RegisterNameUseCase::new(sessions.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                sessions.clone(),
                history.clone(),
                message_pusher,
                clock.clone(),
            )),
            list_users_usecase: Arc::new(ListUsersUseCase::new(sessions)),
            list_messages_usecase: Arc::new(ListMessagesUseCase::new(history)),
            clock,
        }
    }
}
