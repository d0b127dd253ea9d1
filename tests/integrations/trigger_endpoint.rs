//! Integration tests for the trigger endpoint, using a fake delivery client.

#[path = "../helpers/mod.rs"]
mod helpers;

use anyhow::Result;
use chatpush::core::PushMessage;
use helpers::{app::TestApp, created_event, fake_messaging::FakeMessaging};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_new_message_is_dispatched_to_the_chat_topic() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    let test_app = TestApp::start(messaging.clone()).await?;

    let response = test_app
        .post_event(&created_event("8fA3xK", "alice", "hello"))
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "sent");
    assert_eq!(body["message_name"], "projects/test/messages/0:1");

    let sent = messaging.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], PushMessage::broadcast("alice", "hello"));

    test_app.shutdown().await
}

#[tokio::test]
async fn test_missing_username_still_dispatches_with_empty_title() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    let test_app = TestApp::start(messaging.clone()).await?;

    let response = test_app
        .post_event(&json!({
            "document": "chat/8fA3xK",
            "data": { "text": "hi" },
        }))
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let sent = messaging.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].notification.title, "");
    assert_eq!(sent[0].notification.body, "hi");

    test_app.shutdown().await
}

#[tokio::test]
async fn test_event_without_snapshot_is_a_noop_success() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    let test_app = TestApp::start(messaging.clone()).await?;

    let response = test_app
        .post_event(&json!({ "document": "chat/8fA3xK" }))
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "skipped");
    assert!(messaging.sent_messages().is_empty());

    test_app.shutdown().await
}

// Dispatch is deliberately not idempotent: replaying the same event sends a
// second notification.
#[tokio::test]
async fn test_replayed_event_sends_a_second_notification() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    let test_app = TestApp::start(messaging.clone()).await?;
    let event = created_event("8fA3xK", "alice", "hello");

    for _ in 0..2 {
        let response = test_app.post_event(&event).await?;
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(messaging.sent_messages().len(), 2);

    test_app.shutdown().await
}

#[tokio::test]
async fn test_delivery_failure_is_reported_to_the_platform() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    messaging.set_failing(true);
    let test_app = TestApp::start(messaging.clone()).await?;

    let response = test_app
        .post_event(&created_event("8fA3xK", "alice", "hello"))
        .await?;

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "error");

    test_app.shutdown().await
}

#[tokio::test]
async fn test_malformed_body_is_rejected_before_dispatch() -> Result<()> {
    let messaging = Arc::new(FakeMessaging::new());
    let test_app = TestApp::start(messaging.clone()).await?;

    let response = test_app
        .client
        .post(test_app.trigger_url())
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert!(response.status().is_client_error());
    assert!(messaging.sent_messages().is_empty());

    test_app.shutdown().await
}
