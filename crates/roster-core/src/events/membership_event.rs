//! Membership-change notifications
//!
//! The chat service emits several overlapping notification shapes when a
//! group's membership changes. They are normalized into one closed union
//! before they reach the ingestion path.

use crate::value_objects::{ChatId, UserId};

/// A live membership-change notification for one group chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipEvent {
    /// A single member was added by an admin
    Added { chat_id: ChatId, user_id: UserId },
    /// A member joined on their own
    Joined { chat_id: ChatId, user_id: UserId },
    /// Several members were added in one action
    BatchAdded {
        chat_id: ChatId,
        user_ids: Vec<UserId>,
    },
    /// Generic service message carrying the affected identities, used when
    /// the structured events are unavailable or incomplete
    ServiceMessage {
        chat_id: ChatId,
        user_ids: Vec<UserId>,
    },
}

impl MembershipEvent {
    /// The chat this notification applies to
    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Added { chat_id, .. }
            | Self::Joined { chat_id, .. }
            | Self::BatchAdded { chat_id, .. }
            | Self::ServiceMessage { chat_id, .. } => *chat_id,
        }
    }

    /// Short tag for log lines
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Joined { .. } => "joined",
            Self::BatchAdded { .. } => "batch_added",
            Self::ServiceMessage { .. } => "service_message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_extraction() {
        let event = MembershipEvent::BatchAdded {
            chat_id: ChatId::new(-42),
            user_ids: vec![UserId::new(1), UserId::new(2)],
        };
        assert_eq!(event.chat_id(), ChatId::new(-42));
    }

    #[test]
    fn test_kind_tags() {
        let event = MembershipEvent::Joined {
            chat_id: ChatId::new(1),
            user_id: UserId::new(2),
        };
        assert_eq!(event.kind(), "joined");

        let event = MembershipEvent::ServiceMessage {
            chat_id: ChatId::new(1),
            user_ids: vec![],
        };
        assert_eq!(event.kind(), "service_message");
    }
}
