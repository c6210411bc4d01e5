//! MembershipRecord entity <-> model mapper

use roster_core::entities::MembershipRecord;
use roster_core::value_objects::{ChatId, UserId};

use crate::models::MemberModel;

impl From<MemberModel> for MembershipRecord {
    fn from(model: MemberModel) -> Self {
        MembershipRecord {
            user_id: UserId::new(model.user_id),
            chat_id: ChatId::new(model.chat_id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            joined_at: model.joined_at,
            is_deleted: model.is_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_entity() {
        let model = MemberModel {
            user_id: 7,
            chat_id: -100,
            username: "alice_w".to_string(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            joined_at: Utc::now(),
            is_deleted: false,
        };

        let record = MembershipRecord::from(model);
        assert_eq!(record.user_id, UserId::new(7));
        assert_eq!(record.chat_id, ChatId::new(-100));
        assert_eq!(record.username, "alice_w");
        assert!(record.last_name.is_empty());
    }
}
