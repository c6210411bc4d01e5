//! Membership record entity - one observed (member, chat) pair

use chrono::{DateTime, Utc};

use crate::entities::Profile;
use crate::value_objects::{ChatId, UserId};

/// A member observed in a group chat at least once
///
/// Keyed by (`user_id`, `chat_id`). A record's presence means the account was
/// seen as a member of the chat; absence proves nothing (the chat may simply
/// be un-synced). Name fields are frozen at first insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub user_id: UserId,
    pub chat_id: ChatId,
    /// Empty string when the account has no public handle
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Set at first insertion, never updated
    pub joined_at: DateTime<Utc>,
    /// Reserved soft-delete marker; no reconciliation path writes it.
    /// Live deleted-account status is always re-verified remotely.
    pub is_deleted: bool,
}

impl MembershipRecord {
    /// Create a record with unknown name fields
    pub fn new(user_id: UserId, chat_id: ChatId) -> Self {
        Self {
            user_id,
            chat_id,
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            joined_at: Utc::now(),
            is_deleted: false,
        }
    }

    /// Build a record for a chat from a resolved profile
    ///
    /// Absent profile fields are stored as the empty-string sentinel.
    pub fn from_profile(chat_id: ChatId, profile: &Profile) -> Self {
        Self {
            user_id: profile.id,
            chat_id,
            username: profile.username.clone().unwrap_or_default(),
            first_name: profile.first_name.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            joined_at: Utc::now(),
            is_deleted: false,
        }
    }
}
