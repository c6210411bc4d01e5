//! Command surface
//!
//! Trigger points for the reconciliation services. Every trigger is
//! group-scoped and admin-gated; unauthorized or malformed invocations
//! decline silently and produce no visible response.

use tracing::{debug, error, instrument, warn};

use roster_core::value_objects::{ChatId, UserId};

use super::context::ServiceContext;
use super::sweep::DeletionSweeper;

/// Commands exposed by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Sweep confirmed-deleted accounts out of the chat
    CleanUsers,
    /// Report the stored member count for the chat
    MemberCount,
}

/// A parsed command invocation
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub command: Command,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    /// Whether the invocation arrived from a group context
    pub is_group: bool,
}

/// Command dispatch service
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Dispatch one command invocation
    #[instrument(skip(self, invocation), fields(command = ?invocation.command, chat_id = %invocation.chat_id))]
    pub async fn dispatch(&self, invocation: CommandInvocation) {
        if !invocation.is_group {
            debug!("ignoring command outside a group context");
            return;
        }

        if !self
            .is_admin(invocation.chat_id, invocation.sender_id)
            .await
        {
            debug!(sender_id = %invocation.sender_id, "ignoring command from non-admin");
            return;
        }

        match invocation.command {
            Command::CleanUsers => self.clean_users(invocation.chat_id).await,
            Command::MemberCount => self.member_count(invocation.chat_id).await,
        }
    }

    /// Check administrative privileges; a failed lookup counts as "not admin"
    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> bool {
        self.ctx
            .chat_client()
            .get_permissions(chat_id, user_id)
            .await
            .map(|rights| rights.is_admin())
            .unwrap_or(false)
    }

    /// Run the deleted-account sweep, provided the bot itself may remove
    /// participants in the chat
    async fn clean_users(&self, chat_id: ChatId) {
        let me = match self.ctx.chat_client().me().await {
            Ok(me) => me,
            Err(e) => {
                warn!(error = %e, "own profile lookup failed, sweep not started");
                return;
            }
        };

        let rights = match self.ctx.chat_client().get_permissions(chat_id, me.id).await {
            Ok(rights) => rights,
            Err(e) => {
                warn!(error = %e, "own permission lookup failed, sweep not started");
                return;
            }
        };

        if !rights.can_ban_users() {
            debug!(chat_id = %chat_id, "missing ban rights, sweep not started");
            return;
        }

        let sweeper = DeletionSweeper::new(self.ctx);
        if let Err(e) = sweeper.clean_deleted_users(chat_id).await {
            error!(chat_id = %chat_id, error = %e, "sweep failed");
            self.notify_admin("Deleted-account sweep failed").await;
        }
    }

    /// Report the stored member count to the administrative recipient
    async fn member_count(&self, chat_id: ChatId) {
        match self.ctx.member_repo().count_chat_members(chat_id).await {
            Ok(count) => {
                self.notify_admin(&format!("Stored members for chat {chat_id}: {count}"))
                    .await;
            }
            Err(e) => {
                error!(chat_id = %chat_id, error = %e, "stored member count lookup failed");
                self.notify_admin("Stored member count lookup failed").await;
            }
        }
    }

    /// Best-effort notification to the administrative recipient
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
