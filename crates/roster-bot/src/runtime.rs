//! Startup wiring and the update-dispatch loop

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use roster_common::AppConfig;
use roster_core::events::MembershipEvent;
use roster_core::value_objects::{ChatId, UserId};
use roster_db::{create_pool, run_migrations, DatabaseConfig, SqliteMemberRepository};
use roster_service::{
    Command, CommandInvocation, CommandService, EventIngestor, Reconciler, ServiceContext,
    SweepPolicy,
};

use crate::client::{HttpChatClient, UpdateEnvelope, UpdatePayload};

/// Long-poll timeout passed to the gateway
const POLL_TIMEOUT_SECS: u64 = 30;

/// Backoff after a failed update poll
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Work item decoded from one update envelope
#[derive(Debug)]
enum Inbound {
    Event(MembershipEvent),
    Command(CommandInvocation),
}

/// Run the bot until the process is stopped
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let client = Arc::new(HttpChatClient::new(
        &config.gateway.url,
        &config.gateway.token,
    ));
    let ctx = ServiceContext::new(
        Arc::new(SqliteMemberRepository::new(pool)),
        client.clone(),
        UserId::new(config.bot.admin_user_id),
        SweepPolicy {
            removal_delay: config.sweep.removal_delay(),
            treat_unresolvable_as_deleted: config.sweep.treat_unresolvable_as_deleted,
        },
    );

    info!(app = %config.app.name, "bot started");

    run_startup_sync(&ctx, config.bot.auto_sync_chat_id).await;
    run_update_loop(ctx, client).await
}

/// One-shot roster sync at process start, logging outcome only
async fn run_startup_sync(ctx: &ServiceContext, auto_sync_chat_id: Option<i64>) {
    let Some(chat_id) = auto_sync_chat_id else {
        info!("AUTO_SYNC_CHAT_ID not set, startup sync skipped");
        return;
    };
    let chat_id = ChatId::new(chat_id);

    info!(chat_id = %chat_id, "running startup roster sync");
    let newly_added = Reconciler::new(ctx).sync_chat_members(chat_id).await;
    match ctx.member_repo().count_chat_members(chat_id).await {
        Ok(total) => info!(chat_id = %chat_id, newly_added, total, "startup sync complete"),
        Err(e) => warn!(chat_id = %chat_id, error = %e, "stored member count unavailable"),
    }
}

/// Poll the gateway and dispatch every update on its own task, so a slow
/// sweep never blocks live notifications
async fn run_update_loop(ctx: ServiceContext, client: Arc<HttpChatClient>) -> anyhow::Result<()> {
    let mut offset: i64 = 0;
    loop {
        let updates = match client.poll_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "update poll failed");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            if let Some(inbound) = translate(update) {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    dispatch(&ctx, inbound).await;
                });
            }
        }
    }
}

async fn dispatch(ctx: &ServiceContext, inbound: Inbound) {
    match inbound {
        Inbound::Event(event) => EventIngestor::new(ctx).handle_event(event).await,
        Inbound::Command(invocation) => CommandService::new(ctx).dispatch(invocation).await,
    }
}

/// Decode one update envelope into dispatchable work
///
/// Updates that carry nothing actionable (empty affected lists, plain chatter)
/// are dropped here.
fn translate(update: UpdateEnvelope) -> Option<Inbound> {
    let chat_id = ChatId::new(update.chat_id);
    match update.payload {
        UpdatePayload::MemberAdded { user_id } => Some(Inbound::Event(MembershipEvent::Added {
            chat_id,
            user_id: UserId::new(user_id),
        })),
        UpdatePayload::MemberJoined { user_id } => Some(Inbound::Event(MembershipEvent::Joined {
            chat_id,
            user_id: UserId::new(user_id),
        })),
        UpdatePayload::MembersAdded { user_ids } => {
            Some(Inbound::Event(MembershipEvent::BatchAdded {
                chat_id,
                user_ids: user_ids.into_iter().map(UserId::new).collect(),
            }))
        }
        UpdatePayload::ServiceMessage { user_ids } if !user_ids.is_empty() => {
            Some(Inbound::Event(MembershipEvent::ServiceMessage {
                chat_id,
                user_ids: user_ids.into_iter().map(UserId::new).collect(),
            }))
        }
        UpdatePayload::ServiceMessage { .. } => None,
        UpdatePayload::Message { sender_id, text } => {
            parse_command(&text).map(|command| {
                Inbound::Command(CommandInvocation {
                    command,
                    chat_id,
                    sender_id: UserId::new(sender_id),
                    is_group: update.is_group,
                })
            })
        }
    }
}

/// Map command text to a command; anything else is plain chatter
fn parse_command(text: &str) -> Option<Command> {
    match text.trim() {
        "/cleanusers" => Some(Command::CleanUsers),
        "/dbusers" => Some(Command::MemberCount),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(payload: UpdatePayload) -> UpdateEnvelope {
        UpdateEnvelope {
            update_id: 1,
            chat_id: -100,
            is_group: true,
            payload,
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("/cleanusers"), Some(Command::CleanUsers));
        assert_eq!(parse_command("  /dbusers  "), Some(Command::MemberCount));
        assert_eq!(parse_command("hello"), None);
    }

    #[test]
    fn test_translate_member_added() {
        let inbound = translate(envelope(UpdatePayload::MemberAdded { user_id: 7 }));
        assert!(matches!(
            inbound,
            Some(Inbound::Event(MembershipEvent::Added { user_id, .. }))
                if user_id == UserId::new(7)
        ));
    }

    #[test]
    fn test_translate_drops_empty_service_message() {
        let inbound = translate(envelope(UpdatePayload::ServiceMessage { user_ids: vec![] }));
        assert!(inbound.is_none());
    }

    #[test]
    fn test_translate_command_keeps_group_flag() {
        let mut update = envelope(UpdatePayload::Message {
            sender_id: 500,
            text: "/cleanusers".to_string(),
        });
        update.is_group = false;
        let inbound = translate(update);
        assert!(matches!(
            inbound,
            Some(Inbound::Command(CommandInvocation { is_group: false, .. }))
        ));
    }

    #[test]
    fn test_translate_drops_plain_chatter() {
        let inbound = translate(envelope(UpdatePayload::Message {
            sender_id: 500,
            text: "good morning".to_string(),
        }));
        assert!(inbound.is_none());
    }
}
