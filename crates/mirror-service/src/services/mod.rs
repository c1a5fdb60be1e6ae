//! Business logic services
//!
//! This module contains the services that drive the mirroring pipeline and
//! the admin command surface.

pub mod admin;
pub mod context;
pub mod error;
pub mod mirror;

// Re-export all services for convenience
pub use admin::AdminService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use mirror::{MirrorService, PostEvent};
