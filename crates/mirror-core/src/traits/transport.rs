//! Transport trait (port) - outbound delivery to the messaging platform
//!
//! Implemented by the platform client. One operation per `SendSpec` variant
//! plus a generic copy. Markup arguments are the platform's HTML subset.

use async_trait::async_trait;

use crate::entities::PollSpec;
use crate::error::TransportError;
use crate::value_objects::ChatId;

pub type TransportResult<T> = Result<T, TransportError>;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat: ChatId, html: &str, link_preview: bool)
        -> TransportResult<()>;

    async fn send_photo(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()>;

    async fn send_video(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()>;

    async fn send_animation(&self, chat: ChatId, file_id: &str, caption: &str)
        -> TransportResult<()>;

    async fn send_document(&self, chat: ChatId, file_id: &str, caption: &str)
        -> TransportResult<()>;

    async fn send_audio(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()>;

    async fn send_voice(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()>;

    async fn send_video_note(&self, chat: ChatId, file_id: &str) -> TransportResult<()>;

    async fn send_poll(&self, chat: ChatId, poll: &PollSpec) -> TransportResult<()>;

    /// Copy a message verbatim from another chat
    async fn copy_message(
        &self,
        chat: ChatId,
        from_chat: ChatId,
        message_id: i64,
    ) -> TransportResult<()>;
}
