//! Bot API object definitions
//!
//! Only the fields the bot reads are declared; everything else in a payload
//! is ignored on deserialization, except that unrecognised message fields are
//! kept in [`Message::extra`] so the content kind can still be named.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// All outbound markup is sent as HTML
pub const PARSE_MODE: &str = "HTML";

/// Response envelope shared by every Bot API method
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
    pub parameters: Option<ResponseParameters>,
}

/// Extra information about a failed request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseParameters {
    /// Seconds to wait before repeating a flood-limited request
    pub retry_after: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub channel_post: Option<Message>,
    pub edited_channel_post: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

impl Chat {
    pub fn is_channel(&self) -> bool {
        self.kind == "channel"
    }

    pub fn is_private(&self) -> bool {
        self.kind == "private"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    /// Offset in UTF-16 code units
    pub offset: usize,
    /// Length in UTF-16 code units
    pub length: usize,
    pub url: Option<String>,
    pub user: Option<User>,
    pub language: Option<String>,
    pub custom_emoji_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// Any file-backed attachment (video, animation, document, audio, voice,
/// video note); only the file id is needed to re-send it
#[derive(Debug, Clone, Deserialize)]
pub struct FileAttachment {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollOption {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub allows_multiple_answers: bool,
    pub correct_option_id: Option<u32>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,

    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    pub caption: Option<String>,
    #[serde(default)]
    pub caption_entities: Vec<MessageEntity>,

    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    pub video: Option<FileAttachment>,
    pub animation: Option<FileAttachment>,
    pub document: Option<FileAttachment>,
    pub audio: Option<FileAttachment>,
    pub voice: Option<FileAttachment>,
    pub video_note: Option<FileAttachment>,
    pub poll: Option<Poll>,

    /// Remaining fields (dates, signatures, other content kinds, service data)
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ============================================================================
// Outbound payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LinkPreviewOptions {
    pub is_disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub link_preview_options: LinkPreviewOptions,
}

/// `sendPhoto`, `sendVideo`, … share this shape; `field` names the file
/// parameter (`photo`, `video`, …). An empty caption is left out together
/// with its parse mode.
#[derive(Debug, Clone)]
pub struct SendFile<'a> {
    pub chat_id: i64,
    pub field: &'static str,
    pub file_id: &'a str,
    pub caption: &'a str,
}

impl Serialize for SendFile<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_caption = !self.caption.is_empty();
        let mut map = serializer.serialize_map(Some(if with_caption { 4 } else { 2 }))?;
        map.serialize_entry("chat_id", &self.chat_id)?;
        map.serialize_entry(self.field, self.file_id)?;
        if with_caption {
            map.serialize_entry("caption", self.caption)?;
            map.serialize_entry("parse_mode", PARSE_MODE)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendPoll<'a> {
    pub chat_id: i64,
    pub question: &'a str,
    pub options: Vec<InputPollOption<'a>>,
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub allows_multiple_answers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputPollOption<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyMessage {
    pub chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUpdates<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}
