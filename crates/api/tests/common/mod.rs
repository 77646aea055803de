#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use beacon_core::memory::MemoryProfileStore;
use beacon_core::notification::{PushMessage, RecipientRecord};
use beacon_core::ports::{MessagingProvider, PortError, ProfileStore};
use beacon_core::types::MessageId;
use http_body_util::BodyExt;
use tower::ServiceExt;

use beacon_api::auth::jwt::{generate_access_token, JwtConfig};
use beacon_api::config::{GoogleConfig, ServerConfig, StoreBackend};
use beacon_api::router::build_app_router;
use beacon_api::state::AppState;

/// Message id returned by [`FakeMessenger`] on success.
pub const FAKE_MESSAGE_ID: &str = "projects/beacon-test/messages/0:1234567890";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        store: StoreBackend::Memory { seed_path: None },
        google: GoogleConfig::default(),
    }
}

/// Mint a valid caller token for `uid`.
pub fn token_for(uid: &str) -> String {
    generate_access_token(uid, &test_config().jwt).expect("token generation should succeed")
}

/// Records sent messages; fails every send when `failure` is set.
#[derive(Default)]
pub struct FakeMessenger {
    sent: Mutex<Vec<PushMessage>>,
    failure: Option<String>,
}

impl FakeMessenger {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingProvider for FakeMessenger {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, PortError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.failure {
            Some(msg) => Err(msg.clone().into()),
            None => Ok(FAKE_MESSAGE_ID.to_string()),
        }
    }
}

/// A store whose every call fails.
pub struct UnreachableStore;

#[async_trait]
impl ProfileStore for UnreachableStore {
    async fn find_recipient(
        &self,
        _receiver_id: &str,
    ) -> Result<Option<RecipientRecord>, PortError> {
        Err("store unreachable".into())
    }

    async fn ping(&self) -> Result<(), PortError> {
        Err("store unreachable".into())
    }
}

/// Profiles used across tests:
///
/// - `alice`: has a push token
/// - `bob`: profile without a token
pub async fn seeded_store() -> Arc<MemoryProfileStore> {
    let store = Arc::new(MemoryProfileStore::new());
    store
        .insert("alice", RecipientRecord::with_token("alice-device-token"))
        .await;
    store.insert("bob", RecipientRecord::default()).await;
    store
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(
    store: Arc<dyn ProfileStore>,
    messenger: Arc<dyn MessagingProvider>,
) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), store, messenger);
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body, optionally with a Bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body with an arbitrary content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: &'static str,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
