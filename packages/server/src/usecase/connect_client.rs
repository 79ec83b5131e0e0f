//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - Session の作成とアウトバウンドキューの登録
//!
//! ### なぜこのテストが必要か
//! - 接続直後から LIST_USERS に "anonymous" として現れることを保証
//! - ブロードキャストの受信対象として登録されることを保証
//! - 重複登録（不変条件違反）の場合にキューを登録しないことを確認

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RepositoryError, Session, SessionRepository,
    Timestamp,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（接続レジストリ）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 受け付けたコネクションの ID
    /// * `sender` - クライアントへのフレーム送信用キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 作成された Session（"anonymous"）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Session, ConnectError> {
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. Repository に Session を追加
        let session = self
            .repository
            .add(connection_id, connected_at)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id)
                | RepositoryError::SessionNotFound(id) => ConnectError::DuplicateConnection(id),
            })?;

        // 2. MessagePusher にキューを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        Ok(session)
    }
}
