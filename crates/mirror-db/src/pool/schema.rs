//! Schema bootstrap
//!
//! Idempotent; safe to run on every start. Databases written by earlier
//! versions of the bot lack `link_rules.text_replacement`; it is added in
//! place so existing rules keep working.

use sqlx::SqlitePool;
use tracing::info;

const CREATE_CHANNELS: &str = r"
CREATE TABLE IF NOT EXISTS channels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tg_id INTEGER UNIQUE NOT NULL,
    title TEXT,
    kind TEXT CHECK(kind IN ('source', 'destination')) NOT NULL
)";

const CREATE_MAPPINGS: &str = r"
CREATE TABLE IF NOT EXISTS mappings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_tg_id INTEGER NOT NULL,
    dest_tg_id INTEGER NOT NULL,
    UNIQUE(source_tg_id, dest_tg_id)
)";

const CREATE_LINK_RULES: &str = r"
CREATE TABLE IF NOT EXISTS link_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    replacement TEXT NOT NULL,
    text_replacement TEXT
)";

const ADD_TEXT_REPLACEMENT: &str = "ALTER TABLE link_rules ADD COLUMN text_replacement TEXT";

/// Create the channels, mappings and link_rules tables if missing, and
/// upgrade an older link_rules table
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in [CREATE_CHANNELS, CREATE_MAPPINGS, CREATE_LINK_RULES] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    let columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('link_rules')")
            .fetch_all(&mut *tx)
            .await?;
    if !columns.iter().any(|name| name == "text_replacement") {
        sqlx::query(ADD_TEXT_REPLACEMENT).execute(&mut *tx).await?;
        info!("Added link_rules.text_replacement column");
    }
    tx.commit().await?;

    info!("Database schema ready");
    Ok(())
}
