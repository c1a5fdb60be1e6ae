//! Mapping database model

use sqlx::FromRow;

/// Row of the `mappings` table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct MappingModel {
    pub id: i64,
    pub source_tg_id: i64,
    pub dest_tg_id: i64,
}
