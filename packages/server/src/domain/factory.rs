//! Factories for domain identifiers.

use uuid::Uuid;

use super::value_object::ConnectionId;

/// Generates identities for accepted connections
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new, random connection id (UUID v4)
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_returns_unique_ids() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionIdFactory::generate();
        let id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }
}
