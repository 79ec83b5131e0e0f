//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - アウトバウンドキューの登録解除と Session の削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中のクライアントの切断
//! - エッジケース：既に切断済みのクライアントの再切断（冪等）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Session, SessionRepository};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント切断を実行（冪等）
    ///
    /// 先にキューの登録を解除するため、戻った時点以降このクライアントに
    /// ブロードキャストが積まれることはない。
    ///
    /// # Returns
    ///
    /// * `Some(Session)` - 削除された Session
    /// * `None` - 既に切断済み
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.message_pusher.unregister_client(connection_id).await;
        self.repository.remove(connection_id).await
    }
}
