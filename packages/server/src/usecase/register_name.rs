//! UseCase: 表示名の登録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterNameUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：anonymous からの登録、登録済みからの再登録
//! - 異常系：存在しない Session の登録
//! - 表示名の重複は許可される

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, RepositoryError, Session, SessionRepository};

use super::error::RegisterError;

/// 表示名登録のユースケース
pub struct RegisterNameUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl RegisterNameUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 表示名を登録（再登録の場合は置き換え）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<Session, RegisterError> {
        self.repository
            .rename(connection_id, name)
            .await
            .map_err(|e| match e {
                RepositoryError::SessionNotFound(id)
                | RepositoryError::DuplicateConnection(id) => RegisterError::SessionNotFound(id),
            })
    }
}
