//! Service context - dependency container for services
//!
//! Holds the member store, the chat client capability, and the shared
//! operational settings.

use std::sync::Arc;
use std::time::Duration;

use roster_core::traits::{ChatClient, MemberRepository};
use roster_core::value_objects::UserId;

/// Sweep tuning shared by the services
#[derive(Debug, Clone)]
pub struct SweepPolicy {
    /// Delay between consecutive removal attempts
    pub removal_delay: Duration,
    /// Classify members whose profile resolution fails as deleted
    pub treat_unresolvable_as_deleted: bool,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            removal_delay: Duration::from_millis(500),
            treat_unresolvable_as_deleted: true,
        }
    }
}

/// Service context containing all dependencies
///
/// Passed to every service; capabilities are injected so tests can substitute
/// doubles.
#[derive(Clone)]
pub struct ServiceContext {
    member_repo: Arc<dyn MemberRepository>,
    chat_client: Arc<dyn ChatClient>,
    /// Fixed administrative recipient for sweep and count reports
    admin_recipient: UserId,
    sweep: SweepPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        chat_client: Arc<dyn ChatClient>,
        admin_recipient: UserId,
        sweep: SweepPolicy,
    ) -> Self {
        Self {
            member_repo,
            chat_client,
            admin_recipient,
            sweep,
        }
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the chat client
    pub fn chat_client(&self) -> &dyn ChatClient {
        self.chat_client.as_ref()
    }

    /// Get the administrative recipient
    pub fn admin_recipient(&self) -> UserId {
        self.admin_recipient
    }

    /// Get the sweep policy
    pub fn sweep(&self) -> &SweepPolicy {
        &self.sweep
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("member_repo", &"MemberRepository")
            .field("chat_client", &"ChatClient")
            .field("admin_recipient", &self.admin_recipient)
            .field("sweep", &self.sweep)
            .finish()
    }
}
