//! End-to-end pipeline tests
//!
//! Each test drives raw updates through the router into SQLite-backed
//! services and inspects what the recording transport was asked to send.
//!
//! Run with: cargo test -p integration-tests --test pipeline_tests

use integration_tests::fixtures::{
    channel_post, edited_channel_post, registration, text_post, DEST_A, DEST_B, SOURCE,
};
use integration_tests::{Sent, TestApp};
use mirror_common::MirrorConfig;
use mirror_core::{ChatId, MappingRepository};
use mirror_db::SqliteMappingRepository;
use serde_json::json;

/// App with SOURCE mapped to both destinations
async fn mapped_app() -> TestApp {
    let app = TestApp::start().await.expect("Failed to start app");
    app.admin(&format!("/map {SOURCE} {DEST_A}")).await.unwrap();
    app.admin(&format!("/map {SOURCE} {DEST_B}")).await.unwrap();
    app
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_channel_registration_replies_in_channel() {
    let app = TestApp::start().await.unwrap();

    let reply = app
        .handle(registration(SOURCE, "News & Co", "/add_source"))
        .await
        .unwrap()
        .expect("registration should reply");
    assert_eq!(reply.chat_id, SOURCE);
    assert_eq!(
        reply.html,
        "Source channel registered: <code>News &amp; Co</code> (ID: <code>-100111</code>)"
    );

    let reply = app
        .handle(registration(DEST_A, "Mirror", "/add_dest@mirror_bot"))
        .await
        .unwrap()
        .expect("registration should reply");
    assert!(reply.html.starts_with("Destination channel registered"));

    let channels = app.admin("/channels").await.unwrap();
    assert!(channels.contains("<b>source</b> - News &amp; Co"));
    assert!(channels.contains("<b>destination</b> - Mirror"));
}

#[tokio::test]
async fn test_registration_posts_are_not_mirrored() {
    let app = mapped_app().await;

    app.handle(registration(SOURCE, "News", "/add_source"))
        .await
        .unwrap();
    assert!(app.transport.sent().is_empty());
}

#[tokio::test]
async fn test_mappings_show_registered_titles() {
    let app = mapped_app().await;
    app.handle(registration(SOURCE, "Origin", "/add_source"))
        .await
        .unwrap();

    let listing = app.admin("/mappings").await.unwrap();
    assert!(listing.contains("Origin (<code>-100111</code>) ➜ <code>-100222</code>"));
    assert!(listing.contains("<code>-100333</code>"));
}

// ============================================================================
// Admin commands
// ============================================================================

#[tokio::test]
async fn test_admin_commands_require_admin() {
    let app = TestApp::start().await.unwrap();

    let reply = app
        .command_from(42, &format!("/map {SOURCE} {DEST_A}"))
        .await
        .unwrap();
    assert_eq!(reply, "Admins only.");
    assert_eq!(app.admin("/mappings").await.unwrap(), "No mappings yet.");

    // Help stays public
    assert!(app.command_from(42, "/help").await.unwrap().contains("/map"));
}

#[tokio::test]
async fn test_rule_lifecycle() {
    let app = TestApp::start().await.unwrap();

    assert_eq!(app.admin("/rules").await.unwrap(), "No link rules yet.");
    assert_eq!(
        app.admin(r"/addrule example\.com mirror.org Read on Mirror")
            .await
            .unwrap(),
        "Rule #1 added."
    );

    let rules = app.admin("/rules").await.unwrap();
    assert!(rules.contains(r"<code>example\.com</code>"));
    assert!(rules.contains("(text: Read on Mirror)"));

    assert_eq!(app.admin("/delrule 1").await.unwrap(), "Rule #1 deleted.");
    assert_eq!(app.admin("/rules").await.unwrap(), "No link rules yet.");
    assert_eq!(
        app.admin("/delrule 1").await.unwrap(),
        "Link rule not found: 1"
    );
}

#[tokio::test]
async fn test_invalid_rule_pattern_is_rejected() {
    let app = TestApp::start().await.unwrap();

    let reply = app.admin("/addrule ([a-z mirror.org").await.unwrap();
    assert!(!reply.starts_with("Rule #"));
    assert_eq!(app.admin("/rules").await.unwrap(), "No link rules yet.");
}

// ============================================================================
// Mirroring
// ============================================================================

#[tokio::test]
async fn test_text_post_reaches_every_destination() {
    let app = mapped_app().await;

    app.handle(text_post(SOURCE, 10, "Hello <world>"))
        .await
        .unwrap();

    let sent = app.transport.sent();
    assert_eq!(sent.len(), 2);
    for dest in [DEST_A, DEST_B] {
        assert_eq!(
            app.transport.sent_to(dest),
            vec![Sent {
                chat: dest,
                method: "sendMessage",
                payload: "Hello &lt;world&gt;".to_string(),
            }]
        );
    }
}

#[tokio::test]
async fn test_unmapped_source_is_ignored() {
    let app = mapped_app().await;

    app.handle(text_post(-100_999, 1, "nobody listens"))
        .await
        .unwrap();
    assert!(app.transport.sent().is_empty());
}

#[tokio::test]
async fn test_links_are_rewritten_before_delivery() {
    let app = mapped_app().await;
    app.admin(r"/addrule example\.com mirror.org Mirror")
        .await
        .unwrap();

    let post = channel_post(
        SOURCE,
        11,
        json!({
            "text": "Read more or visit https://example.com/b",
            "entities": [
                { "type": "text_link", "offset": 0, "length": 9, "url": "https://example.com/a" },
                { "type": "bold", "offset": 13, "length": 5 }
            ]
        }),
    );
    app.handle(post).await.unwrap();

    let sent = app.transport.sent_to(DEST_A);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].payload,
        "<a href=\"https://mirror.org/a\">Mirror</a> or <b>visit</b> https://mirror.org/b"
    );
}

#[tokio::test]
async fn test_photo_caption_is_rewritten() {
    let app = mapped_app().await;
    app.admin(r"/addrule example\.com mirror.org").await.unwrap();

    let post = channel_post(
        SOURCE,
        12,
        json!({
            "photo": [
                { "file_id": "small", "file_unique_id": "s", "width": 90, "height": 90 },
                { "file_id": "large", "file_unique_id": "l", "width": 1280, "height": 960 }
            ],
            "caption": "https://example.com/pic"
        }),
    );
    app.handle(post).await.unwrap();

    let sent = app.transport.sent_to(DEST_B);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "sendPhoto");
    assert_eq!(sent[0].payload, "large|https://mirror.org/pic");
}

#[tokio::test]
async fn test_video_note_and_poll_are_forwarded() {
    let app = mapped_app().await;

    app.handle(channel_post(
        SOURCE,
        13,
        json!({ "video_note": { "file_id": "note-1", "file_unique_id": "n", "length": 240, "duration": 5 } }),
    ))
    .await
    .unwrap();
    app.handle(channel_post(
        SOURCE,
        14,
        json!({
            "poll": {
                "id": "p1",
                "question": "Tea or coffee?",
                "options": [
                    { "text": "Tea", "voter_count": 0 },
                    { "text": "Coffee", "voter_count": 0 }
                ],
                "total_voter_count": 0,
                "is_closed": false,
                "is_anonymous": true,
                "type": "regular",
                "allows_multiple_answers": false
            }
        }),
    ))
    .await
    .unwrap();

    let methods: Vec<_> = app
        .transport
        .sent_to(DEST_A)
        .into_iter()
        .map(|s| (s.method, s.payload))
        .collect();
    assert_eq!(
        methods,
        vec![
            ("sendVideoNote", "note-1".to_string()),
            ("sendPoll", "Tea or coffee?".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unsupported_content_is_copied_and_service_messages_skipped() {
    let app = mapped_app().await;

    app.handle(channel_post(
        SOURCE,
        15,
        json!({ "sticker": { "file_id": "stk", "file_unique_id": "u", "width": 512, "height": 512 } }),
    ))
    .await
    .unwrap();
    app.handle(channel_post(
        SOURCE,
        16,
        json!({ "pinned_message": { "message_id": 15, "date": 0, "chat": { "id": SOURCE, "type": "channel" } } }),
    ))
    .await
    .unwrap();

    let sent = app.transport.sent_to(DEST_A);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "copyMessage");
    assert_eq!(sent[0].payload, "-100111:15");
}

#[tokio::test]
async fn test_edited_text_gets_marker() {
    let config = MirrorConfig {
        edit_marker: "[edited] ".to_string(),
        ..MirrorConfig::default()
    };
    let app = TestApp::start_with_config(config).await.unwrap();
    app.admin(&format!("/map {SOURCE} {DEST_A}")).await.unwrap();

    app.handle(edited_channel_post(SOURCE, 20, json!({ "text": "fixed typo" })))
        .await
        .unwrap();

    let sent = app.transport.sent_to(DEST_A);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].payload, "[edited] fixed typo");
}

#[tokio::test]
async fn test_failing_destination_does_not_block_others() {
    let app = mapped_app().await;
    app.transport.fail_for(DEST_A);

    app.handle(text_post(SOURCE, 30, "still delivered"))
        .await
        .unwrap();

    assert!(app.transport.sent_to(DEST_A).is_empty());
    assert_eq!(app.transport.sent_to(DEST_B).len(), 1);
}

#[tokio::test]
async fn test_unmap_stops_delivery() {
    let app = mapped_app().await;
    assert!(app
        .admin(&format!("/unmap {SOURCE} {DEST_A}"))
        .await
        .unwrap()
        .starts_with("Unmapped"));

    app.handle(text_post(SOURCE, 40, "only B")).await.unwrap();

    assert!(app.transport.sent_to(DEST_A).is_empty());
    assert_eq!(app.transport.sent_to(DEST_B).len(), 1);
}

#[tokio::test]
async fn test_concurrent_fanout_delivers_once_per_destination() {
    let config = MirrorConfig {
        fanout_concurrency: 4,
        ..MirrorConfig::default()
    };
    let app = TestApp::start_with_config(config).await.unwrap();
    for dest in [DEST_A, DEST_B, -100_444, -100_555] {
        app.admin(&format!("/map {SOURCE} {dest}")).await.unwrap();
    }

    app.handle(text_post(SOURCE, 50, "burst")).await.unwrap();

    let mut chats: Vec<_> = app.transport.sent().into_iter().map(|s| s.chat).collect();
    chats.sort_unstable();
    assert_eq!(chats, vec![-100_555, -100_444, DEST_B, DEST_A]);
}

#[tokio::test]
async fn test_state_persists_in_database() {
    let app = mapped_app().await;

    // A second repository over the same pool sees the stored mappings
    let repo = SqliteMappingRepository::new(app.pool.clone());
    let destinations = repo.list_destinations(ChatId::new(SOURCE)).await.unwrap();
    assert_eq!(destinations, vec![ChatId::new(DEST_A), ChatId::new(DEST_B)]);
}
