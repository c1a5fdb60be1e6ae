//! Ports - interfaces the domain needs from storage and the platform client

mod repositories;
mod transport;

pub use repositories::{ChannelRepository, LinkRuleRepository, MappingRepository, RepoResult};
pub use transport::{Transport, TransportResult};
