//! Domain entities - core business objects

mod channel;
mod link_rule;
mod mapping;
mod post;
mod send_spec;

pub use channel::{Channel, ChannelRole};
pub use link_rule::{LinkRule, NewLinkRule};
pub use mapping::Mapping;
pub use post::{FileRef, Media, PhotoSize, Poll, PollKind, Post, PostContent};
pub use send_spec::{PollSpec, SendSpec};
