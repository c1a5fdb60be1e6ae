//! Content dispatcher
//!
//! Decides, per post kind, how the post is rebuilt in a destination channel.
//! Text and captions go through the link rewriter; media are re-sent by file
//! reference; polls are recreated; anything without a dedicated rebuild is
//! copied verbatim. Service messages are never mirrored.

use mirror_core::{Media, Poll, PollKind, PollSpec, Post, PostContent, SendSpec};

use super::rewriter::LinkRewriter;

/// Build the send instruction for a newly published post
///
/// Returns `None` when the post must not be mirrored.
pub fn dispatch(post: &Post, rewriter: &LinkRewriter<'_>) -> Option<SendSpec> {
    let spec = match &post.content {
        PostContent::Text { html } => SendSpec::Text {
            html: rewriter.rewrite(html),
            link_preview: true,
        },
        PostContent::Photo { sizes, caption } => {
            // Platforms list sizes smallest first; ties keep the later one
            match sizes.iter().max_by_key(|size| size.area()) {
                Some(largest) => SendSpec::Photo {
                    file_id: largest.file.file_id.clone(),
                    caption: rewrite_caption(caption.as_deref(), rewriter),
                },
                None => copy_of(post),
            }
        }
        PostContent::Video(media) => {
            let (file_id, caption) = media_parts(media, rewriter);
            SendSpec::Video { file_id, caption }
        }
        PostContent::Animation(media) => {
            let (file_id, caption) = media_parts(media, rewriter);
            SendSpec::Animation { file_id, caption }
        }
        PostContent::Document(media) => {
            let (file_id, caption) = media_parts(media, rewriter);
            SendSpec::Document { file_id, caption }
        }
        PostContent::Audio(media) => {
            let (file_id, caption) = media_parts(media, rewriter);
            SendSpec::Audio { file_id, caption }
        }
        PostContent::Voice(media) => {
            let (file_id, caption) = media_parts(media, rewriter);
            SendSpec::Voice { file_id, caption }
        }
        PostContent::VideoNote { file } => SendSpec::VideoNote {
            file_id: file.file_id.clone(),
        },
        PostContent::Poll(poll) => SendSpec::Poll(poll_spec(poll)),
        PostContent::Service => return None,
        PostContent::Other { .. } => copy_of(post),
    };

    Some(spec)
}

/// Build the send instruction for an edited post
///
/// Edited text is re-sent as a new message with `edit_marker` in front of the
/// rewritten markup. Other kinds are re-sent exactly as a new post would be.
pub fn dispatch_edited(
    post: &Post,
    rewriter: &LinkRewriter<'_>,
    edit_marker: &str,
) -> Option<SendSpec> {
    match &post.content {
        PostContent::Text { html } => Some(SendSpec::Text {
            html: format!("{edit_marker}{}", rewriter.rewrite(html)),
            link_preview: true,
        }),
        _ => dispatch(post, rewriter),
    }
}

fn rewrite_caption(caption: Option<&str>, rewriter: &LinkRewriter<'_>) -> String {
    caption.map_or_else(String::new, |caption| rewriter.rewrite(caption))
}

fn media_parts(media: &Media, rewriter: &LinkRewriter<'_>) -> (String, String) {
    (
        media.file.file_id.clone(),
        rewrite_caption(media.caption.as_deref(), rewriter),
    )
}

fn copy_of(post: &Post) -> SendSpec {
    SendSpec::Copy {
        from_chat_id: post.chat_id,
        message_id: post.message_id,
    }
}

fn poll_spec(poll: &Poll) -> PollSpec {
    let is_quiz = poll.kind == PollKind::Quiz;
    PollSpec {
        question: poll.question.clone(),
        options: poll.options.clone(),
        is_anonymous: poll.is_anonymous,
        allows_multiple_answers: poll.allows_multiple_answers,
        kind: poll.kind,
        correct_option_id: poll.correct_option_id.filter(|_| is_quiz),
        explanation: poll.explanation.clone().filter(|_| is_quiz),
    }
}
