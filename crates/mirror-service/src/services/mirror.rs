//! Mirror service
//!
//! Entry point for inbound channel posts. Every failure is absorbed here:
//! nothing about a post, a rule or a destination can surface past these calls.

use mirror_core::Post;
use tracing::{debug, error, instrument};

use crate::pipeline::{dispatch, dispatch_edited, FanoutEngine, FanoutReport, LinkRewriter};

use super::context::ServiceContext;

/// How the post reached us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostEvent {
    New,
    Edited,
}

/// Mirror service
pub struct MirrorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MirrorService<'a> {
    /// Create a new MirrorService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mirror a newly published post to every mapped destination
    pub async fn on_new_post(&self, post: &Post) {
        self.mirror(post, PostEvent::New).await;
    }

    /// Re-send an edited post to every mapped destination
    ///
    /// Earlier copies are left as they are; destinations receive a new message.
    pub async fn on_edited_post(&self, post: &Post) {
        self.mirror(post, PostEvent::Edited).await;
    }

    /// Run the pipeline for one post
    ///
    /// Returns the delivery report, or `None` when nothing was sent (no
    /// destinations, a non-mirrored kind, or the rules could not be read).
    #[instrument(
        skip(self, post),
        fields(chat_id = %post.chat_id, message_id = post.message_id, kind = post.content.kind())
    )]
    pub async fn mirror(&self, post: &Post, event: PostEvent) -> Option<FanoutReport> {
        let fanout = FanoutEngine::new(self.ctx.mapping_repo(), self.ctx.fanout_concurrency());

        let destinations = fanout.resolve(post.chat_id).await;
        if destinations.is_empty() {
            debug!("No destinations mapped; skipping");
            return None;
        }

        // Rules are read once per post so every destination gets the same text
        let rules = match self.ctx.rule_repo().list().await {
            Ok(rules) => rules,
            Err(err) => {
                error!(error = %err, "Failed to load link rules; post not mirrored");
                return None;
            }
        };
        let rewriter = LinkRewriter::new(&rules);

        let spec = match event {
            PostEvent::New => dispatch(post, &rewriter),
            PostEvent::Edited => dispatch_edited(post, &rewriter, self.ctx.edit_marker()),
        };
        let Some(spec) = spec else {
            debug!("Post kind is not mirrored");
            return None;
        };

        Some(
            fanout
                .deliver(&destinations, &spec, self.ctx.transport())
                .await,
        )
    }
}
