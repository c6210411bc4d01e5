//! Chat service client capability
//!
//! The wire protocol and authentication handshake live behind this trait.
//! Services receive it as an injected capability so tests can substitute a
//! scripted double.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::Profile;
use crate::value_objects::{ChatId, MemberRights, UserId};

/// Result type for chat client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Chat client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The identity cannot be resolved to an account
    #[error("unresolvable identity: {0}")]
    Unresolvable(UserId),

    /// Network or transport failure before the service answered
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered and rejected the call
    #[error("service rejected the request: {0}")]
    Api(String),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Full current participant listing for a group chat
    ///
    /// Pagination against the remote service is internal to the
    /// implementation; callers always see the complete listing or an error.
    async fn get_participants(&self, chat_id: ChatId) -> ClientResult<Vec<Profile>>;

    /// A member's capability bits within a group chat
    async fn get_permissions(&self, chat_id: ChatId, user_id: UserId)
        -> ClientResult<MemberRights>;

    /// Resolve an identity to its current profile
    async fn get_entity(&self, user_id: UserId) -> ClientResult<Profile>;

    /// Remove (kick) a participant from a group chat
    async fn remove_participant(&self, chat_id: ChatId, user_id: UserId) -> ClientResult<()>;

    /// Send a direct text message to an account
    async fn send_message(&self, recipient: UserId, text: &str) -> ClientResult<()>;

    /// The bot's own account profile
    async fn me(&self) -> ClientResult<Profile>;
}
