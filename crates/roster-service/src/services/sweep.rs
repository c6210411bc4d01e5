//! Deleted-account sweep service
//!
//! Full pass over the stored members of one chat: verify each account's
//! remote status and remove confirmed-deleted accounts from the chat and the
//! store. Members who merely left the group are never touched.

use tracing::{debug, info, instrument, warn};

use roster_core::entities::Profile;
use roster_core::value_objects::{ChatId, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of resolving a stored member against the chat service
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The service returned a current profile
    Resolved(Profile),
    /// The identity could not be resolved to an account
    Unresolvable,
}

/// Classification of a stored member after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Confirmed (or presumed) deleted account; schedule removal
    Deleted,
    /// Live account; leave untouched
    Active,
    /// Unresolvable and the policy declines to presume deletion
    Skipped,
}

/// Counts reported by a completed sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Members classified as deleted
    pub checked: u64,
    /// Members successfully removed from the chat
    pub removed: u64,
}

/// Deleted-account sweep service
pub struct DeletionSweeper<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeletionSweeper<'a> {
    /// Create a new DeletionSweeper
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Classify a resolution outcome under the configured policy
    ///
    /// An unresolvable identity counts as deleted when
    /// `treat_unresolvable_as_deleted` is set: in this domain an identity
    /// that no longer resolves is far more often a deactivated account than
    /// a transient error, and the policy accepts false positives on removal
    /// in exchange for catching genuinely deleted accounts.
    pub fn classify(resolution: &Resolution, treat_unresolvable_as_deleted: bool) -> Verdict {
        match resolution {
            Resolution::Resolved(profile) if profile.is_deleted => Verdict::Deleted,
            Resolution::Resolved(_) => Verdict::Active,
            Resolution::Unresolvable if treat_unresolvable_as_deleted => Verdict::Deleted,
            Resolution::Unresolvable => Verdict::Skipped,
        }
    }

    /// Remove confirmed-deleted accounts from one chat
    ///
    /// Walks every stored member of the chat through
    /// resolve -> classify -> remove. A removal failure leaves the record in
    /// place for the next sweep and never aborts the remaining iterations.
    /// Consecutive removal attempts are separated by the configured delay;
    /// the sleeps are yield points, not blocking waits.
    #[instrument(skip(self))]
    pub async fn clean_deleted_users(&self, chat_id: ChatId) -> ServiceResult<SweepReport> {
        self.notify_admin("Starting deleted-account sweep...").await;

        let members = self.ctx.member_repo().list_chat_members(chat_id).await?;
        let policy = self.ctx.sweep();
        let mut report = SweepReport::default();

        for user_id in members {
            let resolution = self.resolve(user_id).await;
            match Self::classify(&resolution, policy.treat_unresolvable_as_deleted) {
                Verdict::Active | Verdict::Skipped => continue,
                Verdict::Deleted => {}
            }

            report.checked += 1;
            match self
                .ctx
                .chat_client()
                .remove_participant(chat_id, user_id)
                .await
            {
                Ok(()) => {
                    report.removed += 1;
                    info!(user_id = %user_id, chat_id = %chat_id, "deleted account removed");
                    if let Err(e) = self.ctx.member_repo().remove(user_id, chat_id).await {
                        warn!(
                            user_id = %user_id,
                            error = %e,
                            "removed member could not be deleted from store"
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        chat_id = %chat_id,
                        error = %e,
                        "removal failed, record kept for next sweep"
                    );
                }
            }

            tokio::time::sleep(policy.removal_delay).await;
        }

        info!(
            chat_id = %chat_id,
            checked = report.checked,
            removed = report.removed,
            "sweep complete"
        );
        self.notify_admin(&format!(
            "Sweep complete\nChecked: {}\nRemoved: {}",
            report.checked, report.removed
        ))
        .await;

        Ok(report)
    }

    /// Resolve one stored member to a tagged outcome
    async fn resolve(&self, user_id: UserId) -> Resolution {
        match self.ctx.chat_client().get_entity(user_id).await {
            Ok(profile) => Resolution::Resolved(profile),
            Err(e) => {
                debug!(user_id = %user_id, error = %e, "profile resolution failed");
                Resolution::Unresolvable
            }
        }
    }

    /// Best-effort progress notification to the administrative recipient
    async fn notify_admin(&self, text: &str) {
        if let Err(e) = self
            .ctx
            .chat_client()
            .send_message(self.ctx.admin_recipient(), text)
            .await
        {
            warn!(error = %e, "admin notification failed");
        }
    }
}
