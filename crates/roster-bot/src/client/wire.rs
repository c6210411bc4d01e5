//! Wire types for the bot-gateway JSON API

use serde::Deserialize;

use roster_core::entities::Profile;
use roster_core::value_objects::{MemberRights, UserId};

/// Standard gateway response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Account profile as the gateway reports it
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<ProfilePayload> for Profile {
    fn from(payload: ProfilePayload) -> Self {
        Profile {
            id: UserId::new(payload.id),
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            is_bot: payload.is_bot,
            is_deleted: payload.is_deleted,
        }
    }
}

/// Permission bits as the gateway reports them
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PermissionsPayload {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub can_ban_users: bool,
}

impl From<PermissionsPayload> for MemberRights {
    fn from(payload: PermissionsPayload) -> Self {
        let mut rights = MemberRights::empty();
        if payload.is_admin {
            rights |= MemberRights::ADMIN;
        }
        if payload.can_ban_users {
            rights |= MemberRights::BAN_USERS;
        }
        rights
    }
}

/// One long-poll update envelope
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnvelope {
    pub update_id: i64,
    pub chat_id: i64,
    #[serde(default)]
    pub is_group: bool,
    #[serde(flatten)]
    pub payload: UpdatePayload,
}

/// The notification shapes the gateway emits
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdatePayload {
    /// A single member was added by an admin
    MemberAdded { user_id: i64 },
    /// A member joined on their own
    MemberJoined { user_id: i64 },
    /// Several members were added in one action
    MembersAdded { user_ids: Vec<i64> },
    /// Generic service message; `user_ids` lists the affected identities
    ServiceMessage {
        #[serde(default)]
        user_ids: Vec<i64>,
    },
    /// A plain chat message (commands arrive this way)
    Message { sender_id: i64, text: String },
}
