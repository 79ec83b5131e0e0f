//! In-memory repositories guarded by `tokio::sync::RwLock`.
//!
//! No lock is held across an await point other than the lock acquisition
//! itself, so socket I/O never happens under these locks.

mod history;
mod session;

pub use history::InMemoryHistoryRepository;
pub use session::InMemorySessionRepository;
