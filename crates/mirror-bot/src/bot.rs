//! Bot setup
//!
//! Wires configuration, storage, the Bot API client and the services
//! together, then runs the polling loop until shutdown.

use std::sync::Arc;
use std::time::Duration;

use mirror_common::{AppConfig, AppError};
use mirror_db::{SqliteChannelRepository, SqliteLinkRuleRepository, SqliteMappingRepository};
use mirror_service::{ServiceContext, ServiceContextBuilder};
use tracing::{info, warn};

use crate::poller::Poller;
use crate::router::UpdateRouter;
use crate::telegram::BotApi;
use crate::transport::BotApiTransport;

/// Open the database and make sure the schema exists
pub async fn open_database(config: &AppConfig) -> Result<mirror_db::SqlitePool, AppError> {
    info!("Opening SQLite database...");
    let db_config =
        mirror_db::DatabaseConfig::new(config.database.url.clone(), config.database.max_connections);
    let pool = mirror_db::create_pool(&db_config)
        .await
        .map_err(AppError::database)?;
    mirror_db::init_schema(&pool)
        .await
        .map_err(AppError::database)?;
    info!("Database ready");

    Ok(pool)
}

/// Build the service context on top of an open pool
pub fn create_service_context(
    config: &AppConfig,
    pool: mirror_db::SqlitePool,
    api: Arc<BotApi>,
) -> Result<ServiceContext, AppError> {
    let transport = Arc::new(BotApiTransport::new(api, config.bot.send_rate_per_second));

    let ctx = ServiceContextBuilder::new()
        .channel_repo(Arc::new(SqliteChannelRepository::new(pool.clone())))
        .mapping_repo(Arc::new(SqliteMappingRepository::new(pool.clone())))
        .rule_repo(Arc::new(SqliteLinkRuleRepository::new(pool)))
        .transport(transport)
        .admin_ids(config.bot.admin_ids.iter().copied())
        .mirror_config(config.mirror.clone())
        .build()?;

    Ok(ctx)
}

/// Run the bot until `shutdown` resolves
pub async fn run(
    config: AppConfig,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<(), AppError> {
    let pool = open_database(&config).await?;

    let api = Arc::new(BotApi::new(
        &config.bot.api_url,
        &config.bot.token,
        Duration::from_secs(config.bot.http_timeout_secs),
    )?);
    let me = api.get_me().await?;
    info!(bot_id = me.id, username = ?me.username, "Bot authorised");

    if config.bot.admin_ids.is_empty() {
        warn!("ADMIN_IDS is empty; nobody can run admin commands");
    }

    let ctx = create_service_context(&config, pool.clone(), api.clone())?;
    info!(
        fanout_concurrency = ctx.fanout_concurrency(),
        send_rate = config.bot.send_rate_per_second,
        "Services ready"
    );

    let poller = Poller::new(api, UpdateRouter::new(Arc::new(ctx)), config.bot.polling_timeout_secs);
    poller.run(shutdown).await;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}
