//! Bot API transport
//!
//! Implements the outbound [`Transport`] port on top of [`BotApi`]. Every
//! send waits for the shared rate limiter and is attempted exactly once; a
//! flood-wait answer comes back as `TransportError::RateLimited`.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use mirror_core::{ChatId, PollSpec, Transport, TransportResult};
use serde::Serialize;

use crate::telegram::types::{
    CopyMessage, InputPollOption, LinkPreviewOptions, SendFile, SendMessage, SendPoll, PARSE_MODE,
};
use crate::telegram::BotApi;

pub struct BotApiTransport {
    api: Arc<BotApi>,
    limiter: DefaultDirectRateLimiter,
}

impl BotApiTransport {
    /// `sends_per_second` of 0 is treated as 1
    pub fn new(api: Arc<BotApi>, sends_per_second: u32) -> Self {
        let rate = NonZeroU32::new(sends_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            api,
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    async fn send<P>(&self, method: &str, params: &P) -> TransportResult<()>
    where
        P: Serialize + Sync,
    {
        self.limiter.until_ready().await;
        self.api
            .call::<_, serde_json::Value>(method, params)
            .await
            .map(|_| ())
    }

    async fn send_file(
        &self,
        method: &str,
        field: &'static str,
        chat: ChatId,
        file_id: &str,
        caption: &str,
    ) -> TransportResult<()> {
        let params = SendFile {
            chat_id: chat.into_inner(),
            field,
            file_id,
            caption,
        };
        self.send(method, &params).await
    }
}

#[async_trait]
impl Transport for BotApiTransport {
    async fn send_text(&self, chat: ChatId, html: &str, link_preview: bool) -> TransportResult<()> {
        let params = SendMessage {
            chat_id: chat.into_inner(),
            text: html,
            parse_mode: PARSE_MODE,
            link_preview_options: LinkPreviewOptions {
                is_disabled: !link_preview,
            },
        };
        self.send("sendMessage", &params).await
    }

    async fn send_photo(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.send_file("sendPhoto", "photo", chat, file_id, caption).await
    }

    async fn send_video(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.send_file("sendVideo", "video", chat, file_id, caption).await
    }

    async fn send_animation(
        &self,
        chat: ChatId,
        file_id: &str,
        caption: &str,
    ) -> TransportResult<()> {
        self.send_file("sendAnimation", "animation", chat, file_id, caption)
            .await
    }

    async fn send_document(
        &self,
        chat: ChatId,
        file_id: &str,
        caption: &str,
    ) -> TransportResult<()> {
        self.send_file("sendDocument", "document", chat, file_id, caption)
            .await
    }

    async fn send_audio(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.send_file("sendAudio", "audio", chat, file_id, caption).await
    }

    async fn send_voice(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.send_file("sendVoice", "voice", chat, file_id, caption).await
    }

    async fn send_video_note(&self, chat: ChatId, file_id: &str) -> TransportResult<()> {
        self.send_file("sendVideoNote", "video_note", chat, file_id, "")
            .await
    }

    async fn send_poll(&self, chat: ChatId, poll: &PollSpec) -> TransportResult<()> {
        let params = SendPoll {
            chat_id: chat.into_inner(),
            question: &poll.question,
            options: poll
                .options
                .iter()
                .map(|text| InputPollOption { text })
                .collect(),
            is_anonymous: poll.is_anonymous,
            kind: poll.kind.as_str(),
            allows_multiple_answers: poll.allows_multiple_answers,
            correct_option_id: poll.correct_option_id,
            explanation: poll.explanation.as_deref(),
        };
        self.send("sendPoll", &params).await
    }

    async fn copy_message(
        &self,
        chat: ChatId,
        from_chat: ChatId,
        message_id: i64,
    ) -> TransportResult<()> {
        let params = CopyMessage {
            chat_id: chat.into_inner(),
            from_chat_id: from_chat.into_inner(),
            message_id,
        };
        self.send("copyMessage", &params).await
    }
}
