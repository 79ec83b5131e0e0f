//! MessagePusher trait 定義
//!
//! 接続中のクライアントへフレーム（エンコード済みの 1 行）を送るための
//! インターフェース。各コネクションは自分専用のアウトバウンドキューを持ち、
//! 同期的な返信と非同期のブロードキャストは同じキューを通って直列化される。
//!
//! キューは有界。返信は空きを待って積む（読み取りが書き込みの速度に揃う）。
//! ブロードキャストは待たずに積み、キューが満杯なら読まないクライアントとして
//! そのコネクションを停止させる。

use async_trait::async_trait;
use tokio::sync::mpsc::{
    self,
    error::{SendError, TrySendError},
};
use tokio_util::sync::CancellationToken;

use super::{ConnectionId, MessagePushError};

/// Outbound queue of one connection. Each item is one encoded wire line.
#[derive(Debug, Clone)]
pub struct PusherChannel {
    sender: mpsc::Sender<Vec<u8>>,
    stalled: CancellationToken,
}

impl PusherChannel {
    /// Create a queue holding at most `capacity` lines.
    ///
    /// `stalled` is cancelled when a non-waiting push finds the queue full.
    pub fn bounded(
        capacity: usize,
        stalled: CancellationToken,
    ) -> (Self, mpsc::Receiver<Vec<u8>>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender, stalled }, receiver)
    }

    /// Queue a frame, waiting for room
    pub async fn send(&self, frame: Vec<u8>) -> Result<(), SendError<Vec<u8>>> {
        self.sender.send(frame).await
    }

    /// Queue a frame without waiting
    pub fn try_send(&self, frame: Vec<u8>) -> Result<(), TrySendError<Vec<u8>>> {
        let result = self.sender.try_send(frame);
        if let Err(TrySendError::Full(_)) = &result {
            self.stalled.cancel();
        }
        result
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントのアウトバウンドキューを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントのアウトバウンドキューを登録解除（冪等）
    ///
    /// 戻った時点以降、このクライアントへのブロードキャストは行われない
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 複数のクライアントにフレームを送信
    ///
    /// 送信側を待たせない。キューが満杯の対象は停止させて送信失敗として扱う。
    /// 一部の失敗は許容する。全ての対象への送信に失敗した場合のみエラー
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        frame: Vec<u8>,
    ) -> Result<(), MessagePushError>;
}
