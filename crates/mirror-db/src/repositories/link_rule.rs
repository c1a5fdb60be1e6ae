//! SQLite implementation of LinkRuleRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use mirror_core::entities::{LinkRule, NewLinkRule};
use mirror_core::traits::{LinkRuleRepository, RepoResult};

use crate::models::LinkRuleModel;

use super::error::map_db_error;

/// SQLite implementation of LinkRuleRepository
///
/// Application order is the AUTOINCREMENT id, so a removed rule's id is never
/// reused and new rules always land at the end.
#[derive(Clone)]
pub struct SqliteLinkRuleRepository {
    pool: SqlitePool,
}

impl SqliteLinkRuleRepository {
    /// Create a new SqliteLinkRuleRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRuleRepository for SqliteLinkRuleRepository {
    #[instrument(skip(self, rule), fields(pattern = %rule.pattern))]
    async fn add(&self, rule: &NewLinkRule) -> RepoResult<LinkRule> {
        let text_replacement = rule.text_replacement.clone().filter(|t| !t.is_empty());

        let result = sqlx::query(
            r"
            INSERT INTO link_rules (pattern, replacement, text_replacement)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(&rule.pattern)
        .bind(&rule.replacement)
        .bind(&text_replacement)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(LinkRule {
            id: result.last_insert_rowid(),
            pattern: rule.pattern.clone(),
            replacement: rule.replacement.clone(),
            text_replacement,
        })
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM link_rules WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<LinkRule>> {
        let rows = sqlx::query_as::<_, LinkRuleModel>(
            r"
            SELECT id, pattern, replacement, text_replacement FROM link_rules
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(LinkRule::from).collect())
    }
}
