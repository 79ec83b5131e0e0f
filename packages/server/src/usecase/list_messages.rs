//! UseCase: 直近メッセージの取得

use std::sync::Arc;

use crate::domain::{HistoryEntry, HistoryRepository};

/// LIST_MESSAGES で返す最大件数
pub const RECENT_MESSAGES_LIMIT: usize = 20;

pub struct ListMessagesUseCase {
    history: Arc<dyn HistoryRepository>,
}

impl ListMessagesUseCase {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// 直近 `RECENT_MESSAGES_LIMIT` 件を古い順に返す。履歴が空なら `None`
    pub async fn execute(&self) -> Option<Vec<HistoryEntry>> {
        self.history.recent(RECENT_MESSAGES_LIMIT).await
    }
}
