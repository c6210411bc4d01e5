//! Profile entity - a remote account as the chat service reports it

use crate::value_objects::UserId;

/// Snapshot of a remote account profile
///
/// Returned by participant listings and per-identity lookups. The
/// `is_deleted` flag is the service's authoritative deactivated-account
/// marker, distinct from "left the group".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub is_deleted: bool,
}

impl Profile {
    /// Create a minimal Profile with only the identity set
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
            is_bot: false,
            is_deleted: false,
        }
    }

    /// Human-readable name for log lines and notifications
    ///
    /// Falls back from first name to username to the raw identifier.
    pub fn display_name(&self) -> String {
        if let Some(first_name) = self.first_name.as_deref().filter(|s| !s.is_empty()) {
            return first_name.to_string();
        }
        if let Some(username) = self.username.as_deref().filter(|s| !s.is_empty()) {
            return username.to_string();
        }
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_name() {
        let profile = Profile {
            first_name: Some("Alice".to_string()),
            username: Some("alice_w".to_string()),
            ..Profile::new(UserId::new(1))
        };
        assert_eq!(profile.display_name(), "Alice");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let profile = Profile {
            username: Some("alice_w".to_string()),
            ..Profile::new(UserId::new(1))
        };
        assert_eq!(profile.display_name(), "alice_w");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let profile = Profile::new(UserId::new(123));
        assert_eq!(profile.display_name(), "123");
    }
}
