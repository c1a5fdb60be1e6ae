//! Database models - SQLx-compatible structs for SQLite tables

mod channel;
mod link_rule;
mod mapping;

pub use channel::ChannelModel;
pub use link_rule::LinkRuleModel;
pub use mapping::MappingModel;
