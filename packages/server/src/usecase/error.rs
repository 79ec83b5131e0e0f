//! UseCase errors.

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ ConnectionId が既に登録されている（不変条件違反）
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 名前登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("Session for connection '{0}' not found")]
    SessionNotFound(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Session for connection '{0}' not found")]
    SessionNotFound(String),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),
}
