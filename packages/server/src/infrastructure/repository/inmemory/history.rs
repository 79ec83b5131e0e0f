//! InMemory History Repository 実装

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    DisplayName, HistoryEntry, HistoryRepository, MessageContent, MessageHistory, Timestamp,
};

/// インメモリのメッセージ履歴
///
/// 追加は単一の書き込みロックで線形化される。
pub struct InMemoryHistoryRepository {
    history: RwLock<MessageHistory>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::with_history(MessageHistory::new())
    }

    pub fn with_history(history: MessageHistory) -> Self {
        Self {
            history: RwLock::new(history),
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(
        &self,
        sender: DisplayName,
        content: MessageContent,
        sent_at: Timestamp,
    ) -> HistoryEntry {
        let entry = HistoryEntry::new(sender, content, sent_at);
        let mut history = self.history.write().await;
        history.push(entry.clone());
        tracing::debug!(
            "Stored message from '{}' (total: {})",
            entry.sender,
            history.len()
        );
        entry
    }

    async fn recent(&self, count: usize) -> Option<Vec<HistoryEntry>> {
        let history = self.history.read().await;
        history.recent(count)
    }

    async fn len(&self) -> usize {
        let history = self.history.read().await;
        history.len()
    }
}
