//! Command parsing
//!
//! Commands are `/name args…`; an `@botname` suffix on the name is accepted
//! and ignored. Text that is not a known command parses to `None`.

use mirror_core::{ChannelRole, ChatId};

use super::requests::AddRuleRequest;
use crate::services::error::{ServiceError, ServiceResult};

const MAP_USAGE: &str = "Usage: /map <source_id> <dest_id>";
const UNMAP_USAGE: &str = "Usage: /unmap <source_id> <dest_id>";
const ADDRULE_USAGE: &str = "Usage: /addrule <pattern> <replacement> [display text]";
const DELRULE_USAGE: &str = "Usage: /delrule <id>";

/// Command sent by a user in a private chat with the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Start,
    Help,
    Channels,
    Map { source: ChatId, destination: ChatId },
    Unmap { source: ChatId, destination: ChatId },
    Mappings,
    Rules,
    AddRule(AddRuleRequest),
    DelRule { id: i64 },
}

impl AdminCommand {
    /// Parse a private message
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` with the usage line when a known
    /// command has malformed arguments.
    pub fn parse(text: &str) -> ServiceResult<Option<Self>> {
        let Some((name, args)) = split_command(text) else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "channels" => Self::Channels,
            "mappings" => Self::Mappings,
            "rules" => Self::Rules,
            "map" => {
                let (source, destination) = parse_pair(args, MAP_USAGE)?;
                Self::Map {
                    source,
                    destination,
                }
            }
            "unmap" => {
                let (source, destination) = parse_pair(args, UNMAP_USAGE)?;
                Self::Unmap {
                    source,
                    destination,
                }
            }
            "addrule" => Self::AddRule(parse_add_rule(args)?),
            "delrule" => {
                let id = args
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ServiceError::validation(DELRULE_USAGE))?;
                Self::DelRule { id }
            }
            _ => return Ok(None),
        };

        Ok(Some(command))
    }

    /// Whether only configured admins may run the command
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Self::Start | Self::Help)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Channels => "channels",
            Self::Map { .. } => "map",
            Self::Unmap { .. } => "unmap",
            Self::Mappings => "mappings",
            Self::Rules => "rules",
            Self::AddRule(_) => "addrule",
            Self::DelRule { .. } => "delrule",
        }
    }
}

/// Registration command posted inside a channel by the channel itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCommand {
    AddSource,
    AddDest,
}

impl ChannelCommand {
    pub fn parse(text: &str) -> Option<Self> {
        let (name, _) = split_command(text)?;
        match name.as_str() {
            "add_source" => Some(Self::AddSource),
            "add_dest" => Some(Self::AddDest),
            _ => None,
        }
    }

    /// Role the posting channel is registered with
    pub fn role(self) -> ChannelRole {
        match self {
            Self::AddSource => ChannelRole::Source,
            Self::AddDest => ChannelRole::Destination,
        }
    }
}

/// Split `/name@bot args` into a lowercase name and the raw argument text
fn split_command(text: &str) -> Option<(String, &str)> {
    let rest = text.trim_start().strip_prefix('/')?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (head, args) = rest.split_at(end);
    let name = head.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_lowercase(), args))
}

/// Next whitespace-delimited token and the text after it
fn next_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some(text.split_at(end))
}

fn parse_pair(args: &str, usage: &'static str) -> ServiceResult<(ChatId, ChatId)> {
    let mut tokens = args.split_whitespace();
    let (Some(source), Some(destination), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ServiceError::validation(usage));
    };
    let source = ChatId::parse(source).map_err(|_| ServiceError::validation(usage))?;
    let destination = ChatId::parse(destination).map_err(|_| ServiceError::validation(usage))?;
    Ok((source, destination))
}

fn parse_add_rule(args: &str) -> ServiceResult<AddRuleRequest> {
    let (pattern, rest) = next_token(args).ok_or_else(|| ServiceError::validation(ADDRULE_USAGE))?;
    let (replacement, rest) =
        next_token(rest).ok_or_else(|| ServiceError::validation(ADDRULE_USAGE))?;
    let text = rest.trim();

    Ok(AddRuleRequest {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        text_replacement: (!text.is_empty()).then(|| text.to_string()),
    })
}
