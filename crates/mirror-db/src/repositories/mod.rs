//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in mirror-core.

mod channel;
mod error;
mod link_rule;
mod mapping;

pub use channel::SqliteChannelRepository;
pub use link_rule::SqliteLinkRuleRepository;
pub use mapping::SqliteMappingRepository;
