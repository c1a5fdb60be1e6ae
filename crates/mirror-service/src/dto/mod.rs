//! Data transfer objects for the admin surface
//!
//! This module provides:
//! - Command parsing for private admin messages and channel-posted commands
//! - Request DTOs with validation for admin inputs

pub mod commands;
pub mod requests;

pub use commands::{AdminCommand, ChannelCommand};
pub use requests::AddRuleRequest;
