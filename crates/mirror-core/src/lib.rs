//! # mirror-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! outbound transport port used by the mirroring pipeline.
//! This crate has zero dependencies on infrastructure (database, HTTP client, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, ChannelRole, FileRef, LinkRule, Mapping, Media, NewLinkRule, PhotoSize, Poll,
    PollKind, PollSpec, Post, PostContent, SendSpec,
};
pub use error::{DomainError, TransportError};
pub use traits::{
    ChannelRepository, LinkRuleRepository, MappingRepository, RepoResult, Transport,
    TransportResult,
};
pub use value_objects::{ChatId, ChatIdParseError};
