//! Channel database model

use sqlx::FromRow;

/// Row of the `channels` table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub tg_id: i64,
    pub title: Option<String>,
    /// `source` or `destination`
    pub kind: String,
}
