//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    ConnectionId, DisplayName, RepositoryError, Session, SessionRepository, Timestamp,
};

/// Session and the order in which it was added
struct Entry {
    seq: u64,
    session: Session,
}

#[derive(Default)]
struct Registry {
    next_seq: u64,
    /// Key: ConnectionId
    entries: HashMap<ConnectionId, Entry>,
}

impl Registry {
    /// Sessions ordered by connection time, ties broken by arrival
    fn ordered(&self) -> Vec<&Session> {
        let mut ordered: Vec<&Entry> = self.entries.values().collect();
        ordered.sort_by_key(|entry| (entry.session.connected_at, entry.seq));
        ordered.into_iter().map(|entry| &entry.session).collect()
    }
}

/// インメモリ接続レジストリ
///
/// 一覧取得が頻繁なため `RwLock` で読み取りを並行させる。
#[derive(Default)]
pub struct InMemorySessionRepository {
    registry: RwLock<Registry>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn add(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Session, RepositoryError> {
        let mut registry = self.registry.write().await;
        if registry.entries.contains_key(&connection_id) {
            return Err(RepositoryError::DuplicateConnection(
                connection_id.to_string(),
            ));
        }
        let session = Session::new(connection_id, connected_at);
        let seq = registry.next_seq;
        registry.next_seq += 1;
        registry.entries.insert(
            connection_id,
            Entry {
                seq,
                session: session.clone(),
            },
        );
        Ok(session)
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut registry = self.registry.write().await;
        registry
            .entries
            .remove(connection_id)
            .map(|entry| entry.session)
    }

    async fn rename(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<Session, RepositoryError> {
        let mut registry = self.registry.write().await;
        let entry = registry
            .entries
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(connection_id.to_string()))?;
        entry.session.rename(name);
        Ok(entry.session.clone())
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        let registry = self.registry.read().await;
        registry
            .entries
            .get(connection_id)
            .map(|entry| entry.session.clone())
    }

    async fn list_names(&self) -> Vec<DisplayName> {
        let registry = self.registry.read().await;
        registry
            .ordered()
            .into_iter()
            .map(|session| session.name.clone())
            .collect()
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let registry = self.registry.read().await;
        registry
            .ordered()
            .into_iter()
            .map(|session| session.id)
            .collect()
    }

    async fn count(&self) -> usize {
        let registry = self.registry.read().await;
        registry.entries.len()
    }
}
