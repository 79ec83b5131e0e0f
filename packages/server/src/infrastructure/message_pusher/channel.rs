//! mpsc チャンネルを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとのアウトバウンドキュー（有界の `PusherChannel`）を管理
//! - クライアントへのフレーム送信（broadcast）
//!
//! ## 設計ノート
//!
//! キューの生成と、キューからソケットへの書き込みは UI 層
//! （`ui/handler/connection.rs` の writer ループ）で行われます。
//! この実装は生成された `PusherChannel` を受け取り、送信に使用します。
//!
//! 送信はロックを保持したまま `try_send` で行うため、ロック中に待ちが発生することは
//! ありません。キューが満杯のクライアントは停止扱いになり、そのコネクションは閉じられます。
//! `unregister_client` が戻った後にそのクライアントへフレームが積まれることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc::error::TrySendError};

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// mpsc チャンネルを使った MessagePusher 実装
#[derive(Default)]
pub struct ChannelMessagePusher {
    /// 接続中のクライアントのアウトバウンドキュー
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: RwLock<HashMap<ConnectionId, PusherChannel>>,
}

impl ChannelMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.write().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.write().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        frame: Vec<u8>,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.read().await;
        let mut delivered = 0;
        let mut last_error = None;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                match sender.try_send(frame.clone()) {
                    Ok(()) => {
                        tracing::debug!("Broadcasted message to client '{}'", target);
                        delivered += 1;
                    }
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(
                            "Outbound queue of client '{}' is full, closing connection",
                            target
                        );
                        last_error = Some(MessagePushError::PushFailed(target.to_string()));
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::warn!("Outbound queue of client '{}' is closed", target);
                        last_error = Some(MessagePushError::PushFailed(target.to_string()));
                    }
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                last_error = Some(MessagePushError::ClientNotFound(target.to_string()));
            }
        }

        match last_error {
            Some(e) if delivered == 0 => Err(e),
            _ => Ok(()),
        }
    }
}
