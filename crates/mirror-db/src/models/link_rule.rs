//! Link rule database model

use sqlx::FromRow;

/// Row of the `link_rules` table
#[derive(Debug, Clone, FromRow)]
pub struct LinkRuleModel {
    pub id: i64,
    pub pattern: String,
    pub replacement: String,
    pub text_replacement: Option<String>,
}
