//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - SendMessageUseCase::broadcast_message() メソッド
//! - メッセージ履歴への追加とブロードキャスト対象の選定
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にはブロードキャストされないことを保証
//! - 履歴には送信時点の表示名で記録されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 クライアント接続中のメッセージ送信
//! - エッジケース：送信者のみが接続している場合（ブロードキャスト対象なし）
//! - 異常系：既に切断された Session からの送信

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{
    ConnectionId, HistoryEntry, HistoryRepository, MessageContent, MessagePusher,
    SessionRepository, Timestamp,
};

use super::error::SendMessageError;

/// 履歴に記録されたメッセージと、その通知先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub entry: HistoryEntry,
    /// 送信者以外の接続中クライアント
    pub targets: Vec<ConnectionId>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    sessions: Arc<dyn SessionRepository>,
    history: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            history,
            message_pusher,
            clock,
        }
    }

    /// メッセージを履歴に追加し、ブロードキャスト対象を返す
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者のコネクション ID
    /// * `content` - メッセージ内容（空でないことは型で保証済み）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<SentMessage, SendMessageError> {
        // 1. 送信者の現在の表示名を取得
        let session = self
            .sessions
            .get(from)
            .await
            .ok_or_else(|| SendMessageError::SessionNotFound(from.to_string()))?;

        // 2. 履歴に追加
        let sent_at = Timestamp::new(self.clock.now_millis());
        let entry = self.history.append(session.name, content, sent_at).await;

        // 3. ブロードキャスト対象を取得（送信者以外の全てのクライアント）
        let targets = self
            .sessions
            .connection_ids()
            .await
            .into_iter()
            .filter(|id| id != from)
            .collect();

        Ok(SentMessage { entry, targets })
    }

    /// エンコード済みの通知フレームを対象に送信
    pub async fn broadcast_message(
        &self,
        targets: Vec<ConnectionId>,
        frame: Vec<u8>,
    ) -> Result<(), SendMessageError> {
        if targets.is_empty() {
            return Ok(());
        }
        self.message_pusher
            .broadcast(targets, frame)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))
    }
}
