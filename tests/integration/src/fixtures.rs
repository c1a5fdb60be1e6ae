//! Update JSON builders
//!
//! Shapes follow the Bot API `getUpdates` payloads closely enough for the
//! router; fields the bot never reads are left out.

use std::sync::atomic::{AtomicI64, Ordering};

use serde_json::{json, Value};

/// Source channel used across tests
pub const SOURCE: i64 = -100_111;
/// First destination channel
pub const DEST_A: i64 = -100_222;
/// Second destination channel
pub const DEST_B: i64 = -100_333;

static UPDATE_ID: AtomicI64 = AtomicI64::new(1);

/// Next unique update id
pub fn next_update_id() -> i64 {
    UPDATE_ID.fetch_add(1, Ordering::SeqCst)
}

pub fn channel(id: i64, title: &str) -> Value {
    json!({ "id": id, "type": "channel", "title": title })
}

/// Channel post carrying `body` merged over the common message fields
pub fn channel_post(chat_id: i64, message_id: i64, body: Value) -> Value {
    json!({
        "update_id": next_update_id(),
        "channel_post": message(chat_id, message_id, body),
    })
}

pub fn edited_channel_post(chat_id: i64, message_id: i64, body: Value) -> Value {
    json!({
        "update_id": next_update_id(),
        "edited_channel_post": message(chat_id, message_id, body),
    })
}

/// Text channel post without entities
pub fn text_post(chat_id: i64, message_id: i64, text: &str) -> Value {
    channel_post(chat_id, message_id, json!({ "text": text }))
}

/// `/add_source` or `/add_dest` posted inside a channel
pub fn registration(chat_id: i64, title: &str, command: &str) -> Value {
    json!({
        "update_id": next_update_id(),
        "channel_post": {
            "message_id": 1,
            "date": 0,
            "chat": channel(chat_id, title),
            "text": command,
        },
    })
}

/// Private chat message from a user to the bot
pub fn private_message(user_id: i64, text: &str) -> Value {
    json!({
        "update_id": next_update_id(),
        "message": {
            "message_id": next_update_id(),
            "date": 0,
            "chat": { "id": user_id, "type": "private", "first_name": "Admin" },
            "from": { "id": user_id, "is_bot": false, "first_name": "Admin" },
            "text": text,
        },
    })
}

fn message(chat_id: i64, message_id: i64, body: Value) -> Value {
    let mut message = json!({
        "message_id": message_id,
        "date": 0,
        "chat": channel(chat_id, "Channel"),
    });
    if let (Some(target), Value::Object(fields)) = (message.as_object_mut(), body) {
        target.extend(fields);
    }
    message
}
