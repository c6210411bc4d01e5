//! SQLite implementation of MemberRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use roster_core::entities::MembershipRecord;
use roster_core::traits::{MemberRepository, RepoResult};
use roster_core::value_objects::{ChatId, UserId};

use super::error::{map_db_error, member_not_found};

/// SQLite implementation of MemberRepository
#[derive(Clone)]
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Create a new SqliteMemberRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id, chat_id = %record.chat_id))]
    async fn insert_if_absent(&self, record: &MembershipRecord) -> RepoResult<bool> {
        // ON CONFLICT DO NOTHING makes check-and-insert a single atomic
        // statement; concurrent callers racing on the same key cannot both win.
        let result = sqlx::query(
            r#"
            INSERT INTO members (user_id, chat_id, username, first_name, last_name, joined_at, is_deleted)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (user_id, chat_id) DO NOTHING
            "#,
        )
        .bind(record.user_id.into_inner())
        .bind(record.chat_id.into_inner())
        .bind(&record.username)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.joined_at)
        .bind(record.is_deleted)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM members
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<(UserId, ChatId)>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT user_id, chat_id FROM members ORDER BY chat_id, user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, chat_id)| (UserId::new(user_id), ChatId::new(chat_id)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_chat_members(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id FROM members WHERE chat_id = ?1 ORDER BY user_id
            "#,
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }

    #[instrument(skip(self))]
    async fn count_chat_members(&self, chat_id: ChatId) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM members WHERE chat_id = ?1
            "#,
        )
        .bind(chat_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM members WHERE user_id = ?1 AND chat_id = ?2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(chat_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteMemberRepository>();
    }
}
