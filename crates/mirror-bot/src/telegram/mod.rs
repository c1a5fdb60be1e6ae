//! Bot API client, object definitions and conversion into domain posts

pub mod api;
pub mod convert;
pub mod markup;
pub mod types;

pub use api::{BotApi, ALLOWED_UPDATES};
pub use markup::render_html;
pub use types::{Chat, Message, Update, User};
