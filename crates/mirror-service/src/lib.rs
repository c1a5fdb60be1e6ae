//! # mirror-service
//!
//! Application layer: the link rewriter, content dispatcher and fan-out
//! engine that make up the mirroring pipeline, plus the services that drive
//! them and the admin command surface.

pub mod dto;
pub mod pipeline;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::{AddRuleRequest, AdminCommand, ChannelCommand};
pub use pipeline::{
    dispatch, dispatch_edited, escape_attr, escape_html, rewrite, DeliveryOutcome, FanoutEngine,
    FanoutReport, LinkRewriter,
};
pub use services::{
    AdminService, MirrorService, PostEvent, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
