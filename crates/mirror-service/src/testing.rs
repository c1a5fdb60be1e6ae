//! In-memory repositories and a recording transport for unit tests

use std::collections::HashSet;

use async_trait::async_trait;
use mirror_core::{
    Channel, ChannelRepository, ChannelRole, ChatId, DomainError, LinkRule, LinkRuleRepository,
    Mapping, MappingRepository, NewLinkRule, PollSpec, RepoResult, Transport, TransportError,
    TransportResult,
};
use parking_lot::Mutex;

fn unavailable() -> DomainError {
    DomainError::DatabaseError("store unavailable".to_string())
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
pub struct MemoryChannelRepository {
    channels: Mutex<Vec<Channel>>,
}

#[async_trait]
impl ChannelRepository for MemoryChannelRepository {
    async fn upsert(&self, channel: &Channel) -> RepoResult<()> {
        let mut channels = self.channels.lock();
        if let Some(existing) = channels.iter_mut().find(|c| c.chat_id == channel.chat_id) {
            existing.title.clone_from(&channel.title);
            existing.role = channel.role;
        } else {
            let id = channels.len() as i64 + 1;
            channels.push(Channel {
                id,
                ..channel.clone()
            });
        }
        Ok(())
    }

    async fn list(&self, role: Option<ChannelRole>) -> RepoResult<Vec<Channel>> {
        let channels = self.channels.lock();
        Ok(channels
            .iter()
            .rev()
            .filter(|c| role.is_none_or(|role| c.role == role))
            .cloned()
            .collect())
    }

    async fn find(&self, chat_id: ChatId) -> RepoResult<Option<Channel>> {
        Ok(self
            .channels
            .lock()
            .iter()
            .find(|c| c.chat_id == chat_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryMappingRepository {
    mappings: Mutex<Vec<Mapping>>,
    failing: bool,
}

impl MemoryMappingRepository {
    pub fn with(pairs: &[(i64, i64)]) -> Self {
        let mappings = pairs
            .iter()
            .enumerate()
            .map(|(i, &(src, dst))| Mapping {
                id: i as i64 + 1,
                source: ChatId::new(src),
                destination: ChatId::new(dst),
            })
            .collect();
        Self {
            mappings: Mutex::new(mappings),
            failing: false,
        }
    }

    /// Every call fails with a database error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn add(&self, source: ChatId, destination: ChatId) -> RepoResult<bool> {
        self.check()?;
        let mut mappings = self.mappings.lock();
        if mappings
            .iter()
            .any(|m| m.source == source && m.destination == destination)
        {
            return Ok(false);
        }
        let id = mappings.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        mappings.push(Mapping {
            id,
            source,
            destination,
        });
        Ok(true)
    }

    async fn remove(&self, source: ChatId, destination: ChatId) -> RepoResult<bool> {
        self.check()?;
        let mut mappings = self.mappings.lock();
        let before = mappings.len();
        mappings.retain(|m| !(m.source == source && m.destination == destination));
        Ok(mappings.len() != before)
    }

    async fn list_destinations(&self, source: ChatId) -> RepoResult<Vec<ChatId>> {
        self.check()?;
        Ok(self
            .mappings
            .lock()
            .iter()
            .filter(|m| m.source == source)
            .map(|m| m.destination)
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Mapping>> {
        self.check()?;
        Ok(self.mappings.lock().clone())
    }
}

#[derive(Default)]
pub struct MemoryRuleRepository {
    rules: Mutex<Vec<LinkRule>>,
    next_id: Mutex<i64>,
    failing: bool,
}

impl MemoryRuleRepository {
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl LinkRuleRepository for MemoryRuleRepository {
    async fn add(&self, rule: &NewLinkRule) -> RepoResult<LinkRule> {
        if self.failing {
            return Err(unavailable());
        }
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        let stored = LinkRule::new(
            *next_id,
            rule.pattern.clone(),
            rule.replacement.clone(),
            rule.text_replacement.clone().filter(|t| !t.is_empty()),
        );
        self.rules.lock().push(stored.clone());
        Ok(stored)
    }

    async fn remove(&self, id: i64) -> RepoResult<bool> {
        if self.failing {
            return Err(unavailable());
        }
        let mut rules = self.rules.lock();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        Ok(rules.len() != before)
    }

    async fn list(&self) -> RepoResult<Vec<LinkRule>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.rules.lock().clone())
    }
}

// ============================================================================
// Transport
// ============================================================================

/// One recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat: ChatId,
    pub method: &'static str,
    /// Main argument of the call (text, file id, question, `from:message`)
    pub payload: String,
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing: HashSet<ChatId>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls for `chat` fail with an API error and are not recorded
    pub fn failing_for(mut self, chat: ChatId) -> Self {
        self.failing.insert(chat);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    fn record(&self, chat: ChatId, method: &'static str, payload: String) -> TransportResult<()> {
        if self.failing.contains(&chat) {
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
