//! HTTP-level integration tests for the test-notification callable.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use beacon_core::notification::PushMessage;
use common::{body_json, post_json, post_raw, seeded_store, token_for, FakeMessenger};
use serde_json::json;

const ENDPOINT: &str = "/api/v1/notifications/test";

fn callable_body(receiver_id: &str, message: &str) -> serde_json::Value {
    json!({ "data": { "receiverId": receiver_id, "message": message } })
}

/// Assert the callable error envelope.
fn assert_error(json: &serde_json::Value, status: &str, code: &str, message: &str) {
    assert_eq!(json["error"]["status"], status);
    assert_eq!(json["error"]["code"], code);
    assert_eq!(json["error"]["message"], message);
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthenticated() {
    let messenger = Arc::new(FakeMessenger::default());
    let app = common::build_test_app(seeded_store().await, messenger.clone());

    let response = post_json(app, ENDPOINT, callable_body("alice", "hello"), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_error(
        &json,
        "UNAUTHENTICATED",
        "unauthenticated",
        "User must be authenticated",
    );
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn invalid_token_is_unauthenticated() {
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = post_json(
        app,
        ENDPOINT,
        callable_body("alice", "hello"),
        Some("not-a-jwt"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_wins_over_malformed_body() {
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = post_raw(app, ENDPOINT, "application/json", "{not json", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "unauthenticated");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_fields_are_invalid_argument() {
    let token = token_for("sender");
    let bodies = [
        json!({ "data": { "receiverId": "alice" } }),
        json!({ "data": { "message": "hello" } }),
        json!({ "data": { "receiverId": "", "message": "hello" } }),
        json!({ "data": { "receiverId": "alice", "message": "" } }),
        json!({ "data": { "receiverId": 7, "message": "hello" } }),
        json!({}),
    ];

    for body in bodies {
        let messenger = Arc::new(FakeMessenger::default());
        let app = common::build_test_app(seeded_store().await, messenger.clone());

        let response = post_json(app, ENDPOINT, body.clone(), Some(&token)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_error(
            &json,
            "INVALID_ARGUMENT",
            "invalid-argument",
            "receiverId and message are required",
        );
        assert!(messenger.sent().is_empty());
    }
}

#[tokio::test]
async fn malformed_body_with_caller_is_invalid_argument() {
    let token = token_for("sender");
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = post_raw(app, ENDPOINT, "text/plain", "hello", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "invalid-argument");
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_receiver_is_not_found() {
    let token = token_for("sender");
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = post_json(app, ENDPOINT, callable_body("nobody", "hello"), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_error(&json, "NOT_FOUND", "not-found", "Receiver not found");
}

#[tokio::test]
async fn receiver_without_token_is_failed_precondition() {
    let token = token_for("sender");
    let messenger = Arc::new(FakeMessenger::default());
    let app = common::build_test_app(seeded_store().await, messenger.clone());

    let response = post_json(app, ENDPOINT, callable_body("bob", "hello"), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_error(
        &json,
        "FAILED_PRECONDITION",
        "failed-precondition",
        "Receiver has no FCM token",
    );
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn store_failure_is_internal() {
    let token = token_for("sender");
    let app = common::build_test_app(
        Arc::new(common::UnreachableStore),
        Arc::new(FakeMessenger::default()),
    );

    let response = post_json(app, ENDPOINT, callable_body("alice", "hello"), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_error(&json, "INTERNAL", "internal", "store unreachable");
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_send_returns_message_id() {
    let token = token_for("sender");
    let messenger = Arc::new(FakeMessenger::default());
    let app = common::build_test_app(seeded_store().await, messenger.clone());

    let response = post_json(
        app,
        ENDPOINT,
        callable_body("alice", "  hi <b>there</b>  "),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["success"], true);
    assert_eq!(json["result"]["messageId"], common::FAKE_MESSAGE_ID);
    assert_eq!(
        json["result"]["message"],
        "Test notification sent successfully"
    );

    // The message is echoed verbatim into the payload.
    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        PushMessage::test_notification("alice-device-token", "  hi <b>there</b>  ")
    );
}

#[tokio::test]
async fn provider_failure_is_internal_with_provider_message() {
    let token = token_for("sender");
    let messenger = Arc::new(FakeMessenger::failing(
        "The registration token is not a valid FCM registration token",
    ));
    let app = common::build_test_app(seeded_store().await, messenger.clone());

    let response = post_json(app, ENDPOINT, callable_body("alice", "hello"), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_error(
        &json,
        "INTERNAL",
        "internal",
        "The registration token is not a valid FCM registration token",
    );
    assert_eq!(messenger.sent().len(), 1, "exactly one send attempt");
}

#[tokio::test]
async fn function_name_route_is_an_alias() {
    let token = token_for("sender");
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = post_json(
        app,
        "/testNotification",
        callable_body("alice", "hello"),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["messageId"], common::FAKE_MESSAGE_ID);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let app = common::build_test_app(seeded_store().await, Arc::new(FakeMessenger::default()));

    let response = common::get(app, ENDPOINT).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
