//! Transport errors - failures reported by the outbound platform client
//!
//! The fan-out engine treats every variant the same way; the variants exist
//! so logs say what actually went wrong.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The platform rejected the request
    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },

    /// The platform asked us to slow down
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Connection, TLS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// The platform answered with something we could not parse
    #[error("decode error: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn api(code: i64, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }
}
