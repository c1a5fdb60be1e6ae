//! SQLite implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use mirror_core::entities::{Channel, ChannelRole};
use mirror_core::traits::{ChannelRepository, RepoResult};
use mirror_core::value_objects::ChatId;

use crate::models::ChannelModel;

use super::error::map_db_error;

/// SQLite implementation of ChannelRepository
#[derive(Clone)]
pub struct SqliteChannelRepository {
    pool: SqlitePool,
}

impl SqliteChannelRepository {
    /// Create a new SqliteChannelRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for SqliteChannelRepository {
    #[instrument(skip(self, channel), fields(chat_id = %channel.chat_id, role = %channel.role))]
    async fn upsert(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channels (tg_id, title, kind)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(tg_id) DO UPDATE SET title = excluded.title, kind = excluded.kind
            ",
        )
        .bind(channel.chat_id.into_inner())
        .bind(&channel.title)
        .bind(channel.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, role: Option<ChannelRole>) -> RepoResult<Vec<Channel>> {
        let rows = match role {
            Some(role) => {
                sqlx::query_as::<_, ChannelModel>(
                    r"
                    SELECT id, tg_id, title, kind FROM channels
                    WHERE kind = ?1
                    ORDER BY id DESC
                    ",
                )
                .bind(role.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ChannelModel>(
                    r"
                    SELECT id, tg_id, title, kind FROM channels
                    ORDER BY id DESC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        rows.into_iter().map(Channel::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find(&self, chat_id: ChatId) -> RepoResult<Option<Channel>> {
        let row = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, tg_id, title, kind FROM channels
            WHERE tg_id = ?1
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Channel::try_from).transpose()
    }
}
