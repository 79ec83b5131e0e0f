//! UseCase: 接続中ユーザーの一覧

use std::sync::Arc;

use crate::domain::{DisplayName, SessionRepository};

pub struct ListUsersUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl ListUsersUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 接続中の全ての表示名を接続順で返す（未登録は "anonymous"）
    pub async fn execute(&self) -> Vec<DisplayName> {
        self.repository.list_names().await
    }
}
