//! Channel entity - a registered source or destination channel

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::ChatId;

/// Role a registered channel plays in mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelRole {
    /// Posts from this channel are mirrored
    Source,
    /// This channel receives mirrored posts
    Destination,
}

impl ChannelRole {
    /// Storage / display name of the role
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }

    /// Parse a stored role name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "source" => Some(Self::Source),
            "destination" => Some(Self::Destination),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel entity
///
/// Unique on `chat_id`. Re-registering an existing channel replaces its title
/// and role; the pipeline itself never creates channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Storage row id (0 until persisted)
    pub id: i64,
    pub chat_id: ChatId,
    pub title: String,
    pub role: ChannelRole,
}

impl Channel {
    /// Create a channel registration that has not been stored yet
    #[must_use]
    pub fn new(chat_id: ChatId, title: impl Into<String>, role: ChannelRole) -> Self {
        Self {
            id: 0,
            chat_id,
            title: title.into(),
            role,
        }
    }

    /// Title, or a dash when the platform reported none
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "-"
        } else {
            &self.title
        }
    }

    #[inline]
    #[must_use]
    pub fn is_source(&self) -> bool {
        self.role == ChannelRole::Source
    }
}
