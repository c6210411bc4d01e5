//! Roster reconciliation service
//!
//! Reconciles the stored roster of one chat against the live participant
//! listing. The listing is authoritative for "who is currently a member";
//! this service only ever adds, never removes. Removal of confirmed-deleted
//! accounts is the sweep's job, and departures that are not account
//! deletions are left alone entirely.

use std::collections::HashSet;

use tracing::{error, info, instrument};

use roster_core::entities::MembershipRecord;
use roster_core::value_objects::{ChatId, UserId};

use super::context::ServiceContext;

/// Roster reconciliation service
pub struct Reconciler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Reconciler<'a> {
    /// Create a new Reconciler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync the stored roster against the live participant listing
    ///
    /// Returns the number of members newly recorded. Any failure aborts the
    /// whole pass and reports zero progress; records upserted before the
    /// failure remain, since each upsert is independently atomic.
    #[instrument(skip(self))]
    pub async fn sync_chat_members(&self, chat_id: ChatId) -> u64 {
        let participants = match self.ctx.chat_client().get_participants(chat_id).await {
            Ok(participants) => participants,
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "participant listing fetch failed, sync aborted");
                return 0;
            }
        };

        let known: HashSet<UserId> = match self.ctx.member_repo().list_chat_members(chat_id).await
        {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "stored member listing failed, sync aborted");
                return 0;
            }
        };

        let mut newly_added: u64 = 0;
        for profile in &participants {
            if profile.is_bot || known.contains(&profile.id) {
                continue;
            }

            let record = MembershipRecord::from_profile(chat_id, profile);
            match self.ctx.member_repo().insert_if_absent(&record).await {
                Ok(true) => newly_added += 1,
                // Lost the race against a live notification; already recorded
                Ok(false) => {}
                Err(e) => {
                    error!(
                        chat_id = %chat_id,
                        user_id = %profile.id,
                        error = %e,
                        "store write failed, sync aborted"
                    );
                    return 0;
                }
            }
        }

        info!(
            chat_id = %chat_id,
            listed = participants.len(),
            newly_added,
            "roster sync complete"
        );

        newly_added
    }
}
