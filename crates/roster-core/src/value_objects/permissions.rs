//! Member rights bitflags
//!
//! The chat service reports a member's standing in a group as a set of
//! capability bits. Only the two bits the reconciliation engine consumes are
//! modeled here.

use bitflags::bitflags;

bitflags! {
    /// Capability bits for a member within one group chat
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberRights: u32 {
        /// Holds administrative privileges in the group
        const ADMIN     = 1 << 0;
        /// May remove (kick/ban) other participants
        const BAN_USERS = 1 << 1;
    }
}

impl MemberRights {
    /// Check for administrative privileges
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Self::ADMIN)
    }

    /// Check for the remove-participant capability
    ///
    /// Admin status does not imply ban rights; the service grants them
    /// independently.
    #[inline]
    pub fn can_ban_users(&self) -> bool {
        self.contains(Self::BAN_USERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rights() {
        let rights = MemberRights::empty();
        assert!(!rights.is_admin());
        assert!(!rights.can_ban_users());
    }

    #[test]
    fn test_admin_does_not_imply_ban() {
        let rights = MemberRights::ADMIN;
        assert!(rights.is_admin());
        assert!(!rights.can_ban_users());
    }

    #[test]
    fn test_combined_rights() {
        let rights = MemberRights::ADMIN | MemberRights::BAN_USERS;
        assert!(rights.is_admin());
        assert!(rights.can_ban_users());
    }
}
