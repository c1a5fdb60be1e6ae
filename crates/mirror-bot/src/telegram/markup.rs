//! Entity-to-HTML rendering
//!
//! The Bot API delivers formatting as a list of entities over the plain
//! text, with offsets and lengths in UTF-16 code units. The mirroring
//! pipeline works on the HTML subset the API accepts back, so every inbound
//! text and caption is rendered here first.

use mirror_service::{escape_attr, escape_html};

use super::types::MessageEntity;

/// Render `text` with `entities` as Bot API HTML
///
/// Entities are expected to nest; one that overlaps the end of its enclosing
/// entity is cut at that end so the output stays well-formed.
pub fn render_html(text: &str, entities: &[MessageEntity]) -> String {
    if entities.is_empty() {
        return escape_html(text);
    }

    let units: Vec<u16> = text.encode_utf16().collect();
    let len = units.len();

    let mut spans: Vec<(usize, usize, &MessageEntity)> = entities
        .iter()
        .filter_map(|entity| {
            let start = entity.offset.min(len);
            let end = entity.offset.saturating_add(entity.length).min(len);
            (start < end).then_some((start, end, entity))
        })
        .collect();
    // Outer entities first when several start at the same offset
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut out = String::with_capacity(text.len() + spans.len() * 8);
    let mut open: Vec<(usize, &MessageEntity)> = Vec::new();
    let mut next = 0;
    let mut pos = 0;

    loop {
        while let Some(&(end, entity)) = open.last() {
            if end > pos {
                break;
            }
            out.push_str(&close_tag(entity));
            open.pop();
        }

        while let Some(&(start, end, entity)) = spans.get(next) {
            if start != pos {
                break;
            }
            let end = open.last().map_or(end, |&(outer_end, _)| end.min(outer_end));
            out.push_str(&open_tag(entity));
            open.push((end, entity));
            next += 1;
        }

        if pos >= len {
            break;
        }

        let mut boundary = len;
        if let Some(&(start, _, _)) = spans.get(next) {
            boundary = boundary.min(start);
        }
        if let Some(&(end, _)) = open.last() {
            boundary = boundary.min(end);
        }

        out.push_str(&escape_html(&String::from_utf16_lossy(&units[pos..boundary])));
        pos = boundary;
    }

    out
}

fn open_tag(entity: &MessageEntity) -> String {
    match entity.kind.as_str() {
        "bold" => "<b>".to_string(),
        "italic" => "<i>".to_string(),
        "underline" => "<u>".to_string(),
        "strikethrough" => "<s>".to_string(),
        "spoiler" => "<tg-spoiler>".to_string(),
        "code" => "<code>".to_string(),
        "pre" => match entity.language.as_deref().filter(|l| !l.is_empty()) {
            Some(language) => format!(r#"<pre><code class="language-{}">"#, escape_attr(language)),
            None => "<pre>".to_string(),
        },
        "text_link" => format!(
            r#"<a href="{}">"#,
            escape_attr(entity.url.as_deref().unwrap_or_default())
        ),
        "text_mention" => match &entity.user {
            Some(user) => format!(r#"<a href="tg://user?id={}">"#, user.id),
            None => String::new(),
        },
        "blockquote" => "<blockquote>".to_string(),
        "expandable_blockquote" => "<blockquote expandable>".to_string(),
        "custom_emoji" => match &entity.custom_emoji_id {
            Some(id) => format!(r#"<tg-emoji emoji-id="{}">"#, escape_attr(id)),
            None => String::new(),
        },
        // url, mention, hashtag, bot_command, … are plain text in HTML
        _ => String::new(),
    }
}

fn close_tag(entity: &MessageEntity) -> String {
    match entity.kind.as_str() {
        "bold" => "</b>",
        "italic" => "</i>",
        "underline" => "</u>",
        "strikethrough" => "</s>",
        "spoiler" => "</tg-spoiler>",
        "code" => "</code>",
        "pre" if entity.language.as_deref().is_some_and(|l| !l.is_empty()) => "</code></pre>",
        "pre" => "</pre>",
        "text_link" => "</a>",
        "text_mention" if entity.user.is_some() => "</a>",
        "blockquote" | "expandable_blockquote" => "</blockquote>",
        "custom_emoji" if entity.custom_emoji_id.is_some() => "</tg-emoji>",
        _ => "",
    }
    .to_string()
}
