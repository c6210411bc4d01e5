//! Test doubles and fixtures shared by the service integration tests
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roster_core::entities::{MembershipRecord, Profile};
use roster_core::traits::{ChatClient, ClientError, ClientResult, MemberRepository, RepoResult};
use roster_core::value_objects::{ChatId, MemberRights, UserId};
use roster_service::{ServiceContext, SweepPolicy};

/// Fixed administrative recipient used by all tests
pub const ADMIN_ID: i64 = 999;

// ============================================================================
// Member repository double
// ============================================================================

/// In-memory MemberRepository double
#[derive(Default)]
pub struct MemoryMemberRepository {
    rows: Mutex<BTreeMap<(i64, i64), MembershipRecord>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store
    pub fn with_records(records: impl IntoIterator<Item = MembershipRecord>) -> Self {
        let repo = Self::default();
        {
            let mut rows = repo.rows.lock().unwrap();
            for record in records {
                rows.insert(
                    (record.user_id.into_inner(), record.chat_id.into_inner()),
                    record,
                );
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn contains(&self, user_id: UserId, chat_id: ChatId) -> bool {
        self.rows
            .lock()
            .unwrap()
            .contains_key(&(user_id.into_inner(), chat_id.into_inner()))
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn insert_if_absent(&self, record: &MembershipRecord) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let key = (record.user_id.into_inner(), record.chat_id.into_inner());
        if rows.contains_key(&key) {
            return Ok(false);
        }
        rows.insert(key, record.clone());
        Ok(true)
    }

    async fn count_all(&self) -> RepoResult<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn list_all(&self) -> RepoResult<Vec<(UserId, ChatId)>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .keys()
            .map(|&(user_id, chat_id)| (UserId::new(user_id), ChatId::new(chat_id)))
            .collect())
    }

    async fn list_chat_members(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .keys()
            .filter(|&&(_, cid)| cid == chat_id.into_inner())
            .map(|&(user_id, _)| UserId::new(user_id))
            .collect())
    }

    async fn count_chat_members(&self, chat_id: ChatId) -> RepoResult<i64> {
        Ok(self.list_chat_members(chat_id).await?.len() as i64)
    }

    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(&(user_id.into_inner(), chat_id.into_inner()))
            .map(|_| ())
            .ok_or(roster_core::DomainError::MemberNotFound)
    }
}

// ============================================================================
// Chat client double
// ============================================================================

/// Scripted ChatClient double that records outgoing calls
#[derive(Default)]
pub struct MockChatClient {
    participants: HashMap<i64, Vec<Profile>>,
    participants_fail: HashSet<i64>,
    entities: HashMap<i64, Profile>,
    permissions: HashMap<(i64, i64), MemberRights>,
    me: Option<Profile>,
    kick_failures: HashSet<i64>,
    kicked: Mutex<Vec<(ChatId, UserId)>>,
    messages: Mutex<Vec<(UserId, String)>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the participant listing for a chat
    pub fn with_participants(mut self, chat_id: ChatId, profiles: Vec<Profile>) -> Self {
        self.participants.insert(chat_id.into_inner(), profiles);
        self
    }

    /// Make the participant listing for a chat fail
    pub fn with_participants_failure(mut self, chat_id: ChatId) -> Self {
        self.participants_fail.insert(chat_id.into_inner());
        self
    }

    /// Script a resolvable profile; unscripted identities resolve to
    /// `ClientError::Unresolvable`
    pub fn with_entity(mut self, profile: Profile) -> Self {
        self.entities.insert(profile.id.into_inner(), profile);
        self
    }

    /// Script a permission lookup; unscripted lookups fail
    pub fn with_permissions(
        mut self,
        chat_id: ChatId,
        user_id: UserId,
        rights: MemberRights,
    ) -> Self {
        self.permissions
            .insert((chat_id.into_inner(), user_id.into_inner()), rights);
        self
    }

    /// Script the bot's own profile
    pub fn with_me(mut self, profile: Profile) -> Self {
        self.me = Some(profile);
        self
    }

    /// Make removal attempts for a user fail
    pub fn with_kick_failure(mut self, user_id: UserId) -> Self {
        self.kick_failures.insert(user_id.into_inner());
        self
    }

    /// Every removal attempt seen, including failed ones
    pub fn kicked(&self) -> Vec<(ChatId, UserId)> {
        self.kicked.lock().unwrap().clone()
    }

    /// Every message sent
    pub fn messages(&self) -> Vec<(UserId, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn get_participants(&self, chat_id: ChatId) -> ClientResult<Vec<Profile>> {
        if self.participants_fail.contains(&chat_id.into_inner()) {
            return Err(ClientError::Transport("listing unavailable".to_string()));
        }
        self.participants
            .get(&chat_id.into_inner())
            .cloned()
            .ok_or_else(|| ClientError::Api("no participants scripted".to_string()))
    }

    async fn get_permissions(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> ClientResult<MemberRights> {
        self.permissions
            .get(&(chat_id.into_inner(), user_id.into_inner()))
            .copied()
            .ok_or_else(|| ClientError::Api("permission lookup failed".to_string()))
    }

    async fn get_entity(&self, user_id: UserId) -> ClientResult<Profile> {
        self.entities
            .get(&user_id.into_inner())
            .cloned()
            .ok_or(ClientError::Unresolvable(user_id))
    }

    async fn remove_participant(&self, chat_id: ChatId, user_id: UserId) -> ClientResult<()> {
        self.kicked.lock().unwrap().push((chat_id, user_id));
        if self.kick_failures.contains(&user_id.into_inner()) {
            return Err(ClientError::Api("kick rejected".to_string()));
        }
        Ok(())
    }

    async fn send_message(&self, recipient: UserId, text: &str) -> ClientResult<()> {
        self.messages
            .lock()
            .unwrap()
            .push((recipient, text.to_string()));
        Ok(())
    }

    async fn me(&self) -> ClientResult<Profile> {
        self.me
            .clone()
            .ok_or_else(|| ClientError::Api("own profile not scripted".to_string()))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Create a live account profile
pub fn profile(id: i64, first_name: &str) -> Profile {
    Profile {
        first_name: Some(first_name.to_string()),
        username: Some(format!("{}_{id}", first_name.to_lowercase())),
        ..Profile::new(UserId::new(id))
    }
}

/// Create a bot account profile
pub fn bot_profile(id: i64) -> Profile {
    Profile {
        is_bot: true,
        first_name: Some("helper".to_string()),
        ..Profile::new(UserId::new(id))
    }
}

/// Create a deleted account profile
pub fn deleted_profile(id: i64) -> Profile {
    Profile {
        is_deleted: true,
        ..Profile::new(UserId::new(id))
    }
}

/// Create a stored membership record
pub fn record(user_id: i64, chat_id: ChatId) -> MembershipRecord {
    MembershipRecord::from_profile(chat_id, &profile(user_id, "member"))
}

/// Build a service context over the given doubles with the default policy
pub fn context(repo: Arc<MemoryMemberRepository>, client: Arc<MockChatClient>) -> ServiceContext {
    context_with_policy(repo, client, SweepPolicy::default())
}

/// Build a service context with a custom sweep policy
pub fn context_with_policy(
    repo: Arc<MemoryMemberRepository>,
    client: Arc<MockChatClient>,
    sweep: SweepPolicy,
) -> ServiceContext {
    ServiceContext::new(repo, client, UserId::new(ADMIN_ID), sweep)
}
