//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Implementations must be safe for concurrent
//! reads; every call reflects the current stored state (no caching).

use async_trait::async_trait;

use crate::entities::{Channel, ChannelRole, LinkRule, Mapping, NewLinkRule};
use crate::error::DomainError;
use crate::value_objects::ChatId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Channel Registry
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Insert a channel or replace title and role of an existing one
    async fn upsert(&self, channel: &Channel) -> RepoResult<()>;

    /// List registered channels, newest registration first
    async fn list(&self, role: Option<ChannelRole>) -> RepoResult<Vec<Channel>>;

    /// Find channel by platform id
    async fn find(&self, chat_id: ChatId) -> RepoResult<Option<Channel>>;
}

// ============================================================================
// Mapping Store
// ============================================================================

#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Add a mapping; returns false when the pair already existed
    async fn add(&self, source: ChatId, destination: ChatId) -> RepoResult<bool>;

    /// Remove a mapping; returns false when the pair did not exist
    async fn remove(&self, source: ChatId, destination: ChatId) -> RepoResult<bool>;

    /// Destinations mapped from `source`, in insertion order
    async fn list_destinations(&self, source: ChatId) -> RepoResult<Vec<ChatId>>;

    /// All mappings, in insertion order
    async fn list(&self) -> RepoResult<Vec<Mapping>>;
}

// ============================================================================
// Rule Store
// ============================================================================

#[async_trait]
pub trait LinkRuleRepository: Send + Sync {
    /// Append a rule at the end of the application order
    async fn add(&self, rule: &NewLinkRule) -> RepoResult<LinkRule>;

    /// Remove a rule; returns false when it did not exist
    async fn remove(&self, id: i64) -> RepoResult<bool>;

    /// All rules in application order (ascending id)
    async fn list(&self) -> RepoResult<Vec<LinkRule>>;
}
