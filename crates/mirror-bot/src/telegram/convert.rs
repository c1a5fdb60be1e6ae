//! Update-to-domain conversion
//!
//! Classifies a Bot API message into a [`Post`], rendering its text or
//! caption to HTML on the way.

use mirror_core::{ChatId, FileRef, Media, Poll, PollKind, Post, PostContent};

use super::markup::render_html;
use super::types::{FileAttachment, Message};

/// Message fields that mark a chat event rather than content
const SERVICE_FIELDS: &[&str] = &[
    "new_chat_title",
    "new_chat_photo",
    "delete_chat_photo",
    "pinned_message",
    "channel_chat_created",
    "message_auto_delete_timer_changed",
    "migrate_to_chat_id",
    "migrate_from_chat_id",
    "video_chat_scheduled",
    "video_chat_started",
    "video_chat_ended",
    "video_chat_participants_invited",
    "forum_topic_created",
    "forum_topic_edited",
    "forum_topic_closed",
    "forum_topic_reopened",
    "boost_added",
    "chat_background_set",
    "giveaway_created",
    "giveaway_completed",
];

/// Content fields without a dedicated rebuild, checked in this order to name
/// the kind in logs
const OTHER_CONTENT_FIELDS: &[&str] = &[
    "sticker",
    "location",
    "venue",
    "contact",
    "dice",
    "game",
    "story",
    "paid_media",
    "invoice",
    "giveaway",
    "giveaway_winners",
];

impl Message {
    /// Caption rendered to HTML, if any
    fn caption_html(&self) -> Option<String> {
        self.caption
            .as_deref()
            .map(|caption| render_html(caption, &self.caption_entities))
    }

    fn media(&self, file: &FileAttachment) -> Media {
        Media {
            file: FileRef::new(file.file_id.as_str()),
            caption: self.caption_html(),
        }
    }

    fn content(&self) -> PostContent {
        if let Some(text) = &self.text {
            return PostContent::Text {
                html: render_html(text, &self.entities),
            };
        }

        if !self.photo.is_empty() {
            return PostContent::Photo {
                sizes: self
                    .photo
                    .iter()
                    .map(|size| mirror_core::PhotoSize {
                        file: FileRef::new(size.file_id.as_str()),
                        width: size.width,
                        height: size.height,
                    })
                    .collect(),
                caption: self.caption_html(),
            };
        }

        // Animations also carry a `document` field; check them first
        if let Some(file) = &self.animation {
            return PostContent::Animation(self.media(file));
        }
        if let Some(file) = &self.video {
            return PostContent::Video(self.media(file));
        }
        if let Some(file) = &self.document {
            return PostContent::Document(self.media(file));
        }
        if let Some(file) = &self.audio {
            return PostContent::Audio(self.media(file));
        }
        if let Some(file) = &self.voice {
            return PostContent::Voice(self.media(file));
        }
        if let Some(file) = &self.video_note {
            return PostContent::VideoNote {
                file: FileRef::new(file.file_id.as_str()),
            };
        }

        if let Some(poll) = &self.poll {
            return PostContent::Poll(Poll {
                question: poll.question.clone(),
                options: poll.options.iter().map(|o| o.text.clone()).collect(),
                is_anonymous: poll.is_anonymous,
                allows_multiple_answers: poll.allows_multiple_answers,
                kind: if poll.kind == "quiz" {
                    PollKind::Quiz
                } else {
                    PollKind::Regular
                },
                correct_option_id: poll.correct_option_id,
                explanation: poll.explanation.clone(),
            });
        }

        if SERVICE_FIELDS.iter().any(|f| self.extra.contains_key(*f)) {
            return PostContent::Service;
        }

        let kind = OTHER_CONTENT_FIELDS
            .iter()
            .find(|f| self.extra.contains_key(**f))
            .map_or("unknown", |f| *f);
        PostContent::Other {
            kind: kind.to_string(),
        }
    }

    /// Convert into the domain post
    pub fn to_post(&self) -> Post {
        Post::new(ChatId::new(self.chat.id), self.message_id, self.content())
    }
}
