//! SendSpec - the dispatcher's decision of what to deliver to each destination

use crate::entities::PollKind;
use crate::value_objects::ChatId;

/// Poll to be recreated in a destination channel
///
/// `correct_option_id` and `explanation` are only ever set for quizzes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSpec {
    pub question: String,
    pub options: Vec<String>,
    pub is_anonymous: bool,
    pub allows_multiple_answers: bool,
    pub kind: PollKind,
    pub correct_option_id: Option<u32>,
    pub explanation: Option<String>,
}

/// Kind-specific send instruction
///
/// Captions are already rewritten; an empty caption means none is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendSpec {
    Text { html: String, link_preview: bool },
    Photo { file_id: String, caption: String },
    Video { file_id: String, caption: String },
    Animation { file_id: String, caption: String },
    Document { file_id: String, caption: String },
    Audio { file_id: String, caption: String },
    Voice { file_id: String, caption: String },
    VideoNote { file_id: String },
    Poll(PollSpec),
    /// Byte-for-byte copy of the original post
    Copy { from_chat_id: ChatId, message_id: i64 },
}

impl SendSpec {
    /// Short kind name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Video { .. } => "video",
            Self::Animation { .. } => "animation",
            Self::Document { .. } => "document",
            Self::Audio { .. } => "audio",
            Self::Voice { .. } => "voice",
            Self::VideoNote { .. } => "video_note",
            Self::Poll(_) => "poll",
            Self::Copy { .. } => "copy",
        }
    }
}
