//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Link rule not found: {0}")]
    RuleNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid link pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unknown channel role: {0}")]
    UnknownRole(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get a stable error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::RuleNotFound(_) => "UNKNOWN_RULE",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RuleNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. } | Self::UnknownRole(_))
    }
}
