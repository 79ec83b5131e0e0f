//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, HistoryEntry, MessageContent, RepositoryError, Session, Timestamp,
};

/// 接続レジストリ（Connection Registry）
///
/// 接続中のコネクション ID と Session の対応を管理する。
/// 一覧取得は頻繁に行われるため、実装は読み取り優先のロックを使うこと。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しい Session（"anonymous"）を登録
    ///
    /// 同じ ID が既に存在する場合は `RepositoryError::DuplicateConnection`
    async fn add(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Session, RepositoryError>;

    /// Session を削除（冪等）
    ///
    /// 削除された Session を返す。既に存在しない場合は `None`
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 表示名を変更
    async fn rename(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<Session, RepositoryError>;

    /// Session を取得
    async fn get(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 接続中の全ての表示名のスナップショットを取得（接続順）
    async fn list_names(&self) -> Vec<DisplayName>;

    /// 接続中の全てのコネクション ID を取得
    async fn connection_ids(&self) -> Vec<ConnectionId>;

    /// 接続中の Session 数を取得
    async fn count(&self) -> usize;
}

/// メッセージ履歴（History Store）
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// メッセージを末尾に追加し、作成した HistoryEntry を返す
    async fn append(
        &self,
        sender: DisplayName,
        content: MessageContent,
        sent_at: Timestamp,
    ) -> HistoryEntry;

    /// 直近 `count` 件を時系列順で取得。履歴が空の場合は `None`
    async fn recent(&self, count: usize) -> Option<Vec<HistoryEntry>>;

    /// 保持しているメッセージ数を取得
    async fn len(&self) -> usize;
}
