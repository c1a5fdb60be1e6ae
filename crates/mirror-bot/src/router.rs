//! Update routing
//!
//! Maps each inbound update to the service that handles it:
//!
//! - channel post starting with `/add_source` or `/add_dest` → registration
//! - any other channel post → [`MirrorService::on_new_post`]
//! - edited channel post → [`MirrorService::on_edited_post`]
//! - private message starting with `/` → [`AdminService`]

use std::sync::Arc;

use mirror_core::ChatId;
use mirror_service::{AdminService, ChannelCommand, MirrorService, ServiceContext};
use tracing::{debug, error};

use crate::telegram::{Message, Update};

/// Message the bot should send back in response to an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: i64,
    pub html: String,
}

/// Routes updates to services
#[derive(Clone)]
pub struct UpdateRouter {
    ctx: Arc<ServiceContext>,
}

impl UpdateRouter {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle one update; returns the reply to send, if any
    pub async fn route(&self, update: &Update) -> Option<Reply> {
        if let Some(post) = &update.channel_post {
            return self.on_channel_post(post).await;
        }
        if let Some(post) = &update.edited_channel_post {
            MirrorService::new(&self.ctx)
                .on_edited_post(&post.to_post())
                .await;
            return None;
        }
        if let Some(message) = &update.message {
            return self.on_message(message).await;
        }

        debug!(update_id = update.update_id, "Ignoring update without a handled payload");
        None
    }

    async fn on_channel_post(&self, post: &Message) -> Option<Reply> {
        let command = post.text.as_deref().and_then(ChannelCommand::parse);
        let Some(command) = command.filter(|_| post.chat.is_channel()) else {
            MirrorService::new(&self.ctx).on_new_post(&post.to_post()).await;
            return None;
        };

        let title = post.chat.title.as_deref().unwrap_or_default();
        match AdminService::new(&self.ctx)
            .register_channel(ChatId::new(post.chat.id), title, command.role())
            .await
        {
            Ok(html) => Some(Reply {
                chat_id: post.chat.id,
                html,
            }),
            Err(err) => {
                error!(chat_id = post.chat.id, error = %err, "Failed to register channel");
                None
            }
        }
    }

    async fn on_message(&self, message: &Message) -> Option<Reply> {
        if !message.chat.is_private() {
            return None;
        }
        let text = message.text.as_deref()?;
        if !text.trim_start().starts_with('/') {
            return None;
        }
        let sender = message.from.as_ref()?;

        let html = AdminService::new(&self.ctx)
            .handle_message(sender.id, text)
            .await?;
        Some(Reply {
            chat_id: message.chat.id,
            html,
        })
    }
}
