//! Post entity - an inbound channel post, classified by content kind
//!
//! Text and captions are carried as the platform's restricted HTML markup
//! (`<b>`, `<i>`, `<a href="…">`, …), already rendered from entities by the
//! platform adapter.

use serde::{Deserialize, Serialize};

use crate::value_objects::ChatId;

/// Reference to a file already stored on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: String,
}

impl FileRef {
    #[must_use]
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

/// One resolution variant of a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSize {
    pub file: FileRef,
    pub width: u32,
    pub height: u32,
}

impl PhotoSize {
    /// Pixel area, used to pick the largest variant
    #[inline]
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A single file attachment with an optional caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub file: FileRef,
    pub caption: Option<String>,
}

/// Poll type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollKind {
    #[default]
    Regular,
    Quiz,
}

impl PollKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Quiz => "quiz",
        }
    }
}

/// Poll as received from the source channel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
    pub is_anonymous: bool,
    pub allows_multiple_answers: bool,
    pub kind: PollKind,
    pub correct_option_id: Option<u32>,
    pub explanation: Option<String>,
}

/// Content of a post, one variant per kind the pipeline knows how to rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    Text { html: String },
    /// All resolution variants the platform delivered
    Photo {
        sizes: Vec<PhotoSize>,
        caption: Option<String>,
    },
    Video(Media),
    Animation(Media),
    Document(Media),
    Audio(Media),
    Voice(Media),
    /// Round video messages have no caption field
    VideoNote { file: FileRef },
    Poll(Poll),
    /// Chat events (pins, title changes, …); never mirrored
    Service,
    /// Any kind the pipeline has no dedicated rebuild for
    Other { kind: String },
}

impl PostContent {
    /// Short kind name for logging
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Video(_) => "video",
            Self::Animation(_) => "animation",
            Self::Document(_) => "document",
            Self::Audio(_) => "audio",
            Self::Voice(_) => "voice",
            Self::VideoNote { .. } => "video_note",
            Self::Poll(_) => "poll",
            Self::Service => "service",
            Self::Other { kind } => kind,
        }
    }
}

/// Inbound channel post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Channel the post was published in
    pub chat_id: ChatId,
    pub message_id: i64,
    pub content: PostContent,
}

impl Post {
    #[must_use]
    pub fn new(chat_id: ChatId, message_id: i64, content: PostContent) -> Self {
        Self {
            chat_id,
            message_id,
            content,
        }
    }
}
