//! Application error types
//!
//! Errors that stop the bot process: bad configuration, an unusable
//! database, or a Bot API that rejects the token at startup. Per-command and
//! per-delivery failures are handled inside the service layer and never get
//! this far.

use mirror_core::{DomainError, TransportError};
use std::fmt;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Opening the pool or bootstrapping the schema failed
    #[error("Database error: {0}")]
    Database(String),

    /// Bot API unreachable or token rejected
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Services could not be wired together
    #[error("Startup error: {0}")]
    Startup(String),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Stable error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Transport(TransportError::Api { code: 401, .. }) => "UNAUTHORIZED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Domain(e) => e.code(),
            Self::Startup(_) => "STARTUP_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn database(err: impl fmt::Display) -> Self {
        Self::Database(err.to_string())
    }

    #[must_use]
    pub fn startup(msg: impl fmt::Display) -> Self {
        Self::Startup(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
