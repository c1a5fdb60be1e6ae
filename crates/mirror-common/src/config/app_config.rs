//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::collections::HashSet;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub mirror: MirrorConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Bot API client configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    /// Users allowed to run admin commands in private chat
    pub admin_ids: HashSet<i64>,
    pub api_url: String,
    pub http_timeout_secs: u64,
    pub polling_timeout_secs: u64,
    /// Outbound sends allowed per second across all chats
    pub send_rate_per_second: u32,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Mirroring pipeline configuration
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Concurrent deliveries per post; 1 delivers destinations one by one
    pub fanout_concurrency: usize,
    /// Prepended to edited text posts before they are re-sent
    pub edit_marker: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            fanout_concurrency: default_fanout_concurrency(),
            edit_marker: default_edit_marker(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "channel-mirror".to_string()
}

fn default_database_url() -> String {
    "sqlite://mirror.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_http_timeout() -> u64 {
    60
}

fn default_polling_timeout() -> u64 {
    25
}

fn default_send_rate() -> u32 {
    25
}

fn default_fanout_concurrency() -> usize {
    1
}

fn default_edit_marker() -> String {
    "🔁 <i>Updated</i>\n\n".to_string()
}

/// Parse a comma-separated list of numeric user ids, skipping anything else
fn parse_admin_ids(raw: &str) -> HashSet<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|s| s.parse().ok())
        .collect()
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `BOT_TOKEN` is missing or a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("BOT_TOKEN"))?;

        let admin_ids = lookup("ADMIN_IDS")
            .map(|raw| parse_admin_ids(&raw))
            .unwrap_or_default();

        let fanout_concurrency: usize =
            parse_or(&lookup, "FANOUT_CONCURRENCY", default_fanout_concurrency)?;
        if fanout_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "FANOUT_CONCURRENCY",
                "0".to_string(),
            ));
        }

        let send_rate_per_second: u32 =
            parse_or(&lookup, "SEND_RATE_PER_SECOND", default_send_rate)?;
        if send_rate_per_second == 0 {
            return Err(ConfigError::InvalidValue(
                "SEND_RATE_PER_SECOND",
                "0".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            bot: BotConfig {
                token: token.trim().to_string(),
                admin_ids,
                api_url: lookup("TELEGRAM_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_url),
                http_timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", default_http_timeout)?,
                polling_timeout_secs: parse_or(
                    &lookup,
                    "POLLING_TIMEOUT_SECS",
                    default_polling_timeout,
                )?,
                send_rate_per_second,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
            },
            mirror: MirrorConfig {
                fanout_concurrency,
                edit_marker: lookup("EDIT_MARKER").unwrap_or_else(default_edit_marker),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_token() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BOT_TOKEN")));

        let err = AppConfig::from_lookup(lookup_from(&[("BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BOT_TOKEN")));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot.token, "123:abc");
        assert!(config.bot.admin_ids.is_empty());
        assert_eq!(config.bot.api_url, "https://api.telegram.org");
        assert_eq!(config.bot.polling_timeout_secs, 25);
        assert_eq!(config.database.url, "sqlite://mirror.db?mode=rwc");
        assert_eq!(config.mirror.fanout_concurrency, 1);
        assert!(config.mirror.edit_marker.contains("Updated"));
        assert_eq!(config.app.env, Environment::Development);
    }

    #[test]
    fn test_admin_ids_skip_garbage() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_IDS", "42, abc,,-7, 1001 "),
        ]))
        .unwrap();
        assert_eq!(config.bot.admin_ids.len(), 2);
        assert!(config.bot.admin_ids.contains(&42));
        assert!(config.bot.admin_ids.contains(&1001));
        assert!(!config.bot.admin_ids.contains(&-7));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("FANOUT_CONCURRENCY", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("FANOUT_CONCURRENCY", _)));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("FANOUT_CONCURRENCY", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("FANOUT_CONCURRENCY", _)));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("APP_ENV", "Production"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
            ("FANOUT_CONCURRENCY", "4"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.app.env, Environment::Production);
        assert_eq!(config.bot.api_url, "http://localhost:8081");
        assert_eq!(config.mirror.fanout_concurrency, 4);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_environment_names() {
        assert_eq!(Environment::parse("STAGING"), Some(Environment::Staging));
        assert_eq!(Environment::parse("development"), Some(Environment::Development));
        assert_eq!(Environment::parse("prod"), None);
    }
}
