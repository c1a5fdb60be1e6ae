//! Admin service
//!
//! Executes admin commands from private chats and channel registration
//! commands posted inside channels. Replies are HTML.

use std::collections::HashMap;

use mirror_core::{ChannelRole, ChatId, DomainError, NewLinkRule};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{AddRuleRequest, AdminCommand};
use crate::pipeline::{compile_pattern, escape_html};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const START_TEXT: &str = "Hi! I mirror posts from source channels to destination channels. \
                          Send /help to see the commands.";

const HELP_TEXT: &str = "<b>Commands (admins only, in this chat):</b>\n\
/channels - list registered channels\n\
/map &lt;source_id&gt; &lt;dest_id&gt; - mirror a source into a destination\n\
/unmap &lt;source_id&gt; &lt;dest_id&gt; - remove a mapping\n\
/mappings - list mappings\n\
/rules - list link rewrite rules\n\
/addrule &lt;pattern&gt; &lt;replacement&gt; [display text] - add a rule (regex; \
use $1 for group 1 in the replacement)\n\
/delrule &lt;id&gt; - delete a rule by id\n\n\
<b>In channels:</b>\n\
Post /add_source in a source channel or /add_dest in a destination channel.";

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a private message; returns the reply, or `None` when the message
    /// is not a command this service knows
    pub async fn handle_message(&self, sender_id: i64, text: &str) -> Option<String> {
        let result = match AdminCommand::parse(text) {
            Ok(None) => return None,
            Ok(Some(command)) => self.execute(sender_id, command).await,
            Err(_) if !self.ctx.is_admin(sender_id) => Err(ServiceError::NotAdmin),
            Err(err) => Err(err),
        };

        Some(match result {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_user_error() {
                    warn!(sender_id, code = err.error_code(), error = %err, "Admin command rejected");
                } else {
                    error!(sender_id, code = err.error_code(), error = %err, "Admin command failed");
                }
                escape_html(&err.user_message())
            }
        })
    }

    /// Execute a parsed command on behalf of `sender_id`
    #[instrument(skip(self, command), fields(command = command.name()))]
    pub async fn execute(&self, sender_id: i64, command: AdminCommand) -> ServiceResult<String> {
        if command.requires_admin() && !self.ctx.is_admin(sender_id) {
            return Err(ServiceError::NotAdmin);
        }

        match command {
            AdminCommand::Start => Ok(START_TEXT.to_string()),
            AdminCommand::Help => Ok(HELP_TEXT.to_string()),
            AdminCommand::Channels => self.list_channels().await,
            AdminCommand::Map {
                source,
                destination,
            } => self.map(source, destination).await,
            AdminCommand::Unmap {
                source,
                destination,
            } => self.unmap(source, destination).await,
            AdminCommand::Mappings => self.list_mappings().await,
            AdminCommand::Rules => self.list_rules().await,
            AdminCommand::AddRule(request) => self.add_rule(request).await,
            AdminCommand::DelRule { id } => self.delete_rule(id).await,
        }
    }

    /// Register the channel a `/add_source` or `/add_dest` was posted in
    #[instrument(skip(self))]
    pub async fn register_channel(
        &self,
        chat_id: ChatId,
        title: &str,
        role: ChannelRole,
    ) -> ServiceResult<String> {
        let channel = mirror_core::Channel::new(chat_id, title, role);
        self.ctx.channel_repo().upsert(&channel).await?;

        info!(%chat_id, title, role = role.as_str(), "Channel registered");

        let label = match role {
            ChannelRole::Source => "Source",
            ChannelRole::Destination => "Destination",
        };
        Ok(format!(
            "{label} channel registered: <code>{}</code> (ID: <code>{chat_id}</code>)",
            escape_html(channel.display_title())
        ))
    }

    async fn list_channels(&self) -> ServiceResult<String> {
        let channels = self.ctx.channel_repo().list(None).await?;
        if channels.is_empty() {
            return Ok("No channels registered yet.".to_string());
        }

        let lines: Vec<String> = channels
            .iter()
            .map(|c| {
                format!(
                    "#{} <b>{}</b> - {} (id: <code>{}</code>)",
                    c.id,
                    c.role,
                    escape_html(c.display_title()),
                    c.chat_id
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn map(&self, source: ChatId, destination: ChatId) -> ServiceResult<String> {
        if source == destination {
            return Err(ServiceError::validation(
                "Source and destination must be different channels",
            ));
        }

        let added = self.ctx.mapping_repo().add(source, destination).await?;
        if added {
            info!(%source, %destination, "Mapping added");
            Ok(format!(
                "Mapped: <code>{source}</code> ➜ <code>{destination}</code>"
            ))
        } else {
            Ok(format!(
                "Already mapped: <code>{source}</code> ➜ <code>{destination}</code>"
            ))
        }
    }

    async fn unmap(&self, source: ChatId, destination: ChatId) -> ServiceResult<String> {
        let removed = self.ctx.mapping_repo().remove(source, destination).await?;
        if !removed {
            return Err(ServiceError::not_found(
                "Mapping",
                format!("{source} -> {destination}"),
            ));
        }

        info!(%source, %destination, "Mapping removed");
        Ok(format!(
            "Unmapped: <code>{source}</code> ✖ <code>{destination}</code>"
        ))
    }

    async fn list_mappings(&self) -> ServiceResult<String> {
        let mappings = self.ctx.mapping_repo().list().await?;
        if mappings.is_empty() {
            return Ok("No mappings yet.".to_string());
        }

        let titles: HashMap<ChatId, String> = self
            .ctx
            .channel_repo()
            .list(None)
            .await?
            .into_iter()
            .map(|c| (c.chat_id, c.title))
            .collect();
        let describe = |chat: ChatId| match titles.get(&chat).filter(|t| !t.is_empty()) {
            Some(title) => format!("{} (<code>{chat}</code>)", escape_html(title)),
            None => format!("<code>{chat}</code>"),
        };

        let lines: Vec<String> = mappings
            .iter()
            .map(|m| format!("{} ➜ {}", describe(m.source), describe(m.destination)))
            .collect();
        Ok(lines.join("\n"))
    }

    async fn list_rules(&self) -> ServiceResult<String> {
        let rules = self.ctx.rule_repo().list().await?;
        if rules.is_empty() {
            return Ok("No link rules yet.".to_string());
        }

        let lines: Vec<String> = rules
            .iter()
            .map(|r| {
                let mut line = format!(
                    "#{} <code>{}</code> ➜ <code>{}</code>",
                    r.id,
                    escape_html(&r.pattern),
                    escape_html(&r.replacement)
                );
                if let Some(text) = &r.text_replacement {
                    line.push_str(&format!(" (text: {})", escape_html(text)));
                }
                line
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn add_rule(&self, request: AddRuleRequest) -> ServiceResult<String> {
        request.validate()?;
        if has_backslash_group_ref(&request.replacement) {
            return Err(ServiceError::validation(
                "Group references are written $1, not \\1",
            ));
        }
        compile_pattern(&request.pattern).map_err(|err| DomainError::InvalidPattern {
            pattern: request.pattern.clone(),
            reason: err.to_string(),
        })?;

        let rule = self
            .ctx
            .rule_repo()
            .add(&NewLinkRule::from(request))
            .await?;

        info!(rule_id = rule.id, pattern = %rule.pattern, "Link rule added");
        Ok(format!("Rule #{} added.", rule.id))
    }

    async fn delete_rule(&self, id: i64) -> ServiceResult<String> {
        if !self.ctx.rule_repo().remove(id).await? {
            return Err(DomainError::RuleNotFound(id).into());
        }

        info!(rule_id = id, "Link rule deleted");
        Ok(format!("Rule #{id} deleted."))
    }
}

/// `\1`-style references would be copied literally by the regex engine
fn has_backslash_group_ref(replacement: &str) -> bool {
    replacement
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'\\' && pair[1].is_ascii_digit())
}
