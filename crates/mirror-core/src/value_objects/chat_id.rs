//! Chat ID - platform-native numeric identifier of a channel or chat
//!
//! Channel IDs are negative (`-100…` prefixed) and private chats positive, so
//! the full `i64` range is significant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-native chat identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Create a new ChatId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Channels and supergroups carry negative identifiers
    #[inline]
    pub const fn is_group_like(&self) -> bool {
        self.0 < 0
    }

    /// Parse from string representation (surrounding whitespace is ignored)
    pub fn parse(s: &str) -> Result<Self, ChatIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| ChatIdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a ChatId from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatIdParseError {
    #[error("invalid chat id: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ChatId> for i64 {
    fn from(id: ChatId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ChatId {
    type Err = ChatIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatId::parse(s)
    }
}
