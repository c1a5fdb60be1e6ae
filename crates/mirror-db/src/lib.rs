//! # mirror-db
//!
//! Database layer implementing repository traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides SQLite implementations for the repository traits
//! defined in `mirror-core`. It handles:
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mirror_db::pool::{create_pool, init_schema, DatabaseConfig};
//! use mirror_db::repositories::SqliteLinkRuleRepository;
//! use mirror_core::traits::LinkRuleRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::in_memory()).await?;
//!     init_schema(&pool).await?;
//!     let rules = SqliteLinkRuleRepository::new(pool);
//!
//!     let ordered = rules.list().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, init_schema, DatabaseConfig, SqlitePool};
pub use repositories::{
    SqliteChannelRepository, SqliteLinkRuleRepository, SqliteMappingRepository,
};
