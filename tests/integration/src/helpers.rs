//! Test helpers for integration tests
//!
//! Builds a complete service context over an in-memory SQLite database and
//! records every outbound call instead of talking to the Bot API.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mirror_bot::telegram::Update;
use mirror_bot::{Reply, UpdateRouter};
use mirror_common::MirrorConfig;
use mirror_core::{ChatId, PollSpec, Transport, TransportError, TransportResult};
use mirror_db::{
    create_pool, init_schema, DatabaseConfig, SqliteChannelRepository, SqliteLinkRuleRepository,
    SqliteMappingRepository, SqlitePool,
};
use mirror_service::ServiceContextBuilder;
use parking_lot::Mutex;

/// User id allowed to run admin commands
pub const ADMIN_ID: i64 = 1001;

/// One outbound call captured by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat: i64,
    pub method: &'static str,
    /// Main payload: HTML for text, `file_id|caption` for media, question for polls
    pub payload: String,
}

/// Transport that records calls and can be told to fail for chosen chats
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<HashSet<i64>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every send to `chat` with a 403
    pub fn fail_for(&self, chat: i64) {
        self.failing.lock().insert(chat);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn sent_to(&self, chat: i64) -> Vec<Sent> {
        self.sent
            .lock()
            .iter()
            .filter(|s| s.chat == chat)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }

    fn record(&self, chat: ChatId, method: &'static str, payload: String) -> TransportResult<()> {
        let chat = chat.into_inner();
        if self.failing.lock().contains(&chat) {
            return Err(TransportError::api(403, "Forbidden: bot is not a member"));
        }
        self.sent.lock().push(Sent {
            chat,
            method,
            payload,
        });
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat: ChatId, html: &str, _link_preview: bool) -> TransportResult<()> {
        self.record(chat, "sendMessage", html.to_string())
    }

    async fn send_photo(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.record(chat, "sendPhoto", format!("{file_id}|{caption}"))
    }

    async fn send_video(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.record(chat, "sendVideo", format!("{file_id}|{caption}"))
    }

    async fn send_animation(
        &self,
        chat: ChatId,
        file_id: &str,
        caption: &str,
    ) -> TransportResult<()> {
        self.record(chat, "sendAnimation", format!("{file_id}|{caption}"))
    }

    async fn send_document(
        &self,
        chat: ChatId,
        file_id: &str,
        caption: &str,
    ) -> TransportResult<()> {
        self.record(chat, "sendDocument", format!("{file_id}|{caption}"))
    }

    async fn send_audio(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.record(chat, "sendAudio", format!("{file_id}|{caption}"))
    }

    async fn send_voice(&self, chat: ChatId, file_id: &str, caption: &str) -> TransportResult<()> {
        self.record(chat, "sendVoice", format!("{file_id}|{caption}"))
    }

    async fn send_video_note(&self, chat: ChatId, file_id: &str) -> TransportResult<()> {
        self.record(chat, "sendVideoNote", file_id.to_string())
    }

    async fn send_poll(&self, chat: ChatId, poll: &PollSpec) -> TransportResult<()> {
        self.record(chat, "sendPoll", poll.question.clone())
    }

    async fn copy_message(
        &self,
        chat: ChatId,
        from_chat: ChatId,
        message_id: i64,
    ) -> TransportResult<()> {
        self.record(chat, "copyMessage", format!("{from_chat}:{message_id}"))
    }
}

/// Router wired to SQLite repositories and a recording transport
pub struct TestApp {
    pub router: UpdateRouter,
    pub transport: Arc<RecordingTransport>,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Fresh app with an empty database and [`ADMIN_ID`] as the only admin
    pub async fn start() -> Result<Self> {
        Self::start_with_config(MirrorConfig::default()).await
    }

    pub async fn start_with_config(mirror: MirrorConfig) -> Result<Self> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await?;
        init_schema(&pool).await?;

        let transport = Arc::new(RecordingTransport::new());
        let ctx = ServiceContextBuilder::new()
            .channel_repo(Arc::new(SqliteChannelRepository::new(pool.clone())))
            .mapping_repo(Arc::new(SqliteMappingRepository::new(pool.clone())))
            .rule_repo(Arc::new(SqliteLinkRuleRepository::new(pool.clone())))
            .transport(transport.clone())
            .admin_ids([ADMIN_ID])
            .mirror_config(mirror)
            .build()?;

        Ok(Self {
            router: UpdateRouter::new(Arc::new(ctx)),
            transport,
            pool,
        })
    }

    /// Route one raw update JSON the way the poller would
    pub async fn handle(&self, update: serde_json::Value) -> Result<Option<Reply>> {
        let update: Update = serde_json::from_value(update)?;
        Ok(self.router.route(&update).await)
    }

    /// Send an admin command from [`ADMIN_ID`] and return the reply text
    pub async fn admin(&self, text: &str) -> Result<String> {
        self.command_from(ADMIN_ID, text).await
    }

    /// Send a private command from `user_id` and return the reply text
    pub async fn command_from(&self, user_id: i64, text: &str) -> Result<String> {
        let reply = self
            .handle(crate::fixtures::private_message(user_id, text))
            .await?;
        reply
            .map(|r| r.html)
            .ok_or_else(|| anyhow::anyhow!("no reply to {text:?}"))
    }
}
