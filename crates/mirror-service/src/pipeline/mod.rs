//! Mirroring pipeline
//!
//! post → [`dispatch`] (with a [`LinkRewriter`]) → [`FanoutEngine::deliver`].

pub mod dispatcher;
pub mod fanout;
pub mod rewriter;

pub use dispatcher::{dispatch, dispatch_edited};
pub use fanout::{send_to, DeliveryOutcome, FanoutEngine, FanoutReport};
pub use rewriter::{
    compile_pattern, escape_attr, escape_html, rewrite, unescape_html, LinkRewriter,
};
