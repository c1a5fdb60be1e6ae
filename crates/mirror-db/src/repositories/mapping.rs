//! SQLite implementation of MappingRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use mirror_core::entities::Mapping;
use mirror_core::traits::{MappingRepository, RepoResult};
use mirror_core::value_objects::ChatId;

use crate::models::MappingModel;

use super::error::map_db_error;

/// SQLite implementation of MappingRepository
#[derive(Clone)]
pub struct SqliteMappingRepository {
    pool: SqlitePool,
}

impl SqliteMappingRepository {
    /// Create a new SqliteMappingRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    #[instrument(skip(self))]
    async fn add(&self, source: ChatId, destination: ChatId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO mappings (source_tg_id, dest_tg_id)
            VALUES (?1, ?2)
            ",
        )
        .bind(source.into_inner())
        .bind(destination.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove(&self, source: ChatId, destination: ChatId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM mappings
            WHERE source_tg_id = ?1 AND dest_tg_id = ?2
            ",
        )
        .bind(source.into_inner())
        .bind(destination.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_destinations(&self, source: ChatId) -> RepoResult<Vec<ChatId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT dest_tg_id FROM mappings
            WHERE source_tg_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(source.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(ChatId::new).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Mapping>> {
        let rows = sqlx::query_as::<_, MappingModel>(
            r"
            SELECT id, source_tg_id, dest_tg_id FROM mappings
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Mapping::from).collect())
    }
}
