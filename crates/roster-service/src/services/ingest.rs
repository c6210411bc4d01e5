//! Event ingestion service
//!
//! Consumes live membership-change notifications and records previously
//! unseen members in the store.

use tracing::{debug, info, instrument, warn};

use roster_core::entities::MembershipRecord;
use roster_core::events::MembershipEvent;
use roster_core::value_objects::{ChatId, UserId};

use super::context::ServiceContext;

/// Event ingestion service
pub struct EventIngestor<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventIngestor<'a> {
    /// Create a new EventIngestor
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle one membership-change notification
    ///
    /// Never fails: every per-identity error is caught, logged, and skipped,
    /// so one bad identity cannot abort the rest of a batch. Nothing is
    /// retried.
    #[instrument(skip(self, event), fields(kind = event.kind(), chat_id = %event.chat_id()))]
    pub async fn handle_event(&self, event: MembershipEvent) {
        match event {
            MembershipEvent::Added { chat_id, user_id } => {
                self.on_added(chat_id, user_id).await;
            }
            MembershipEvent::Joined { chat_id, user_id } => {
                self.on_joined(chat_id, user_id).await;
            }
            MembershipEvent::BatchAdded { chat_id, user_ids } => {
                self.on_batch_added(chat_id, &user_ids).await;
            }
            MembershipEvent::ServiceMessage { chat_id, user_ids } => {
                self.on_service_message(chat_id, &user_ids).await;
            }
        }
    }

    /// A single member was added by an admin
    async fn on_added(&self, chat_id: ChatId, user_id: UserId) {
        self.ingest_one(chat_id, user_id, "added").await;
    }

    /// A member joined on their own
    async fn on_joined(&self, chat_id: ChatId, user_id: UserId) {
        self.ingest_one(chat_id, user_id, "joined").await;
    }

    /// Several members were added in one action; upserted in listing order
    async fn on_batch_added(&self, chat_id: ChatId, user_ids: &[UserId]) {
        for &user_id in user_ids {
            self.ingest_one(chat_id, user_id, "batch_added").await;
        }
    }

    /// Generic service message carrying the affected identities
    async fn on_service_message(&self, chat_id: ChatId, user_ids: &[UserId]) {
        for &user_id in user_ids {
            self.ingest_one(chat_id, user_id, "service_message").await;
        }
    }

    /// Resolve one identity and record it if it is a previously unseen,
    /// non-bot member
    async fn ingest_one(&self, chat_id: ChatId, user_id: UserId, source: &'static str) {
        let profile = match self.ctx.chat_client().get_entity(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    source,
                    "profile resolution failed, skipping member"
                );
                return;
            }
        };

        if profile.is_bot {
            debug!(user_id = %user_id, "skipping bot account");
            return;
        }

        let record = MembershipRecord::from_profile(chat_id, &profile);
        match self.ctx.member_repo().insert_if_absent(&record).await {
            Ok(true) => {
                info!(
                    user_id = %user_id,
                    chat_id = %chat_id,
                    name = %profile.display_name(),
                    source,
                    "member recorded"
                );
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    source,
                    "store write failed, skipping member"
                );
            }
        }
    }
}
