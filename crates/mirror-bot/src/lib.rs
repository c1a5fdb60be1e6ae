//! # mirror-bot
//!
//! Bot API adapter for the channel mirror: HTTP client, update conversion,
//! the outbound transport and the long-polling loop.

pub mod bot;
pub mod poller;
pub mod router;
pub mod telegram;
pub mod transport;

pub use bot::run;
pub use router::{Reply, UpdateRouter};
pub use transport::BotApiTransport;
