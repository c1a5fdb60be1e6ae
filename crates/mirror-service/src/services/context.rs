//! Service context - dependency container for services
//!
//! Holds the repositories, the outbound transport and the pipeline settings
//! needed by services.

use std::collections::HashSet;
use std::sync::Arc;

use mirror_common::MirrorConfig;
use mirror_core::traits::{ChannelRepository, LinkRuleRepository, MappingRepository, Transport};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    channel_repo: Arc<dyn ChannelRepository>,
    mapping_repo: Arc<dyn MappingRepository>,
    rule_repo: Arc<dyn LinkRuleRepository>,

    // Outbound
    transport: Arc<dyn Transport>,

    // Settings
    admin_ids: Arc<HashSet<i64>>,
    mirror: MirrorConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        channel_repo: Arc<dyn ChannelRepository>,
        mapping_repo: Arc<dyn MappingRepository>,
        rule_repo: Arc<dyn LinkRuleRepository>,
        transport: Arc<dyn Transport>,
        admin_ids: HashSet<i64>,
        mirror: MirrorConfig,
    ) -> Self {
        Self {
            channel_repo,
            mapping_repo,
            rule_repo,
            transport,
            admin_ids: Arc::new(admin_ids),
            mirror,
        }
    }

    // === Repositories ===

    /// Get the channel registry
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the mapping store
    pub fn mapping_repo(&self) -> &dyn MappingRepository {
        self.mapping_repo.as_ref()
    }

    /// Get the link rule store
    pub fn rule_repo(&self) -> &dyn LinkRuleRepository {
        self.rule_repo.as_ref()
    }

    // === Outbound ===

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // === Settings ===

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn fanout_concurrency(&self) -> usize {
        self.mirror.fanout_concurrency
    }

    pub fn edit_marker(&self) -> &str {
        &self.mirror.edit_marker
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("transport", &"...")
            .field("admins", &self.admin_ids.len())
            .field("mirror", &self.mirror)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    mapping_repo: Option<Arc<dyn MappingRepository>>,
    rule_repo: Option<Arc<dyn LinkRuleRepository>>,
    transport: Option<Arc<dyn Transport>>,
    admin_ids: HashSet<i64>,
    mirror: MirrorConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn mapping_repo(mut self, repo: Arc<dyn MappingRepository>) -> Self {
        self.mapping_repo = Some(repo);
        self
    }

    pub fn rule_repo(mut self, repo: Arc<dyn LinkRuleRepository>) -> Self {
        self.rule_repo = Some(repo);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn admin_ids(mut self, admin_ids: impl IntoIterator<Item = i64>) -> Self {
        self.admin_ids = admin_ids.into_iter().collect();
        self
    }

    pub fn mirror_config(mut self, mirror: MirrorConfig) -> Self {
        self.mirror = mirror;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.channel_repo
                .ok_or_else(|| ServiceError::validation("channel_repo is required"))?,
            self.mapping_repo
                .ok_or_else(|| ServiceError::validation("mapping_repo is required"))?,
            self.rule_repo
                .ok_or_else(|| ServiceError::validation("rule_repo is required"))?,
            self.transport
                .ok_or_else(|| ServiceError::validation("transport is required"))?,
            self.admin_ids,
            self.mirror,
        ))
    }
}
