//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from storage; the infrastructure
//! layer provides the implementation.

use async_trait::async_trait;

use crate::entities::MembershipRecord;
use crate::error::DomainError;
use crate::value_objects::{ChatId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a record iff none exists for its (user_id, chat_id) key
    ///
    /// Returns whether an insertion occurred. The check-and-insert must be
    /// atomic per key: the event ingestor and the reconciler may race on the
    /// same member, and exactly one caller wins with the loser's write
    /// becoming a no-op.
    async fn insert_if_absent(&self, record: &MembershipRecord) -> RepoResult<bool>;

    /// Total number of stored records across all chats
    async fn count_all(&self) -> RepoResult<i64>;

    /// Every stored (user_id, chat_id) pair
    async fn list_all(&self) -> RepoResult<Vec<(UserId, ChatId)>>;

    /// Member ids stored for one chat
    async fn list_chat_members(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>>;

    /// Number of records stored for one chat
    async fn count_chat_members(&self, chat_id: ChatId) -> RepoResult<i64>;

    /// Delete the record for (user_id, chat_id)
    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()>;
}
