//! Service-account token exchange against a mock OAuth2 endpoint.
//!
//! `fixtures/service-account.json` holds a throwaway RSA key generated for
//! these tests only.

use std::sync::Arc;

use beacon_core::notification::PushMessage;
use beacon_google::credentials::{SCOPE_DATASTORE, SCOPE_FIREBASE_MESSAGING};
use beacon_google::{
    AccessTokenSource, FcmConfig, FcmMessenger, GoogleError, ServiceAccountKey,
    ServiceAccountTokenSource,
};
use mockito::Matcher;

fn fixture_key(token_uri: String) -> ServiceAccountKey {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service-account.json");
    let mut key = ServiceAccountKey::from_file(path).expect("fixture key should parse");
    key.token_uri = token_uri;
    key
}

fn token_source(token_uri: String) -> ServiceAccountTokenSource {
    ServiceAccountTokenSource::new(
        fixture_key(token_uri),
        &[SCOPE_FIREBASE_MESSAGING, SCOPE_DATASTORE],
        beacon_google::http_client().unwrap(),
    )
    .expect("fixture key should be a valid RSA PEM")
}

#[tokio::test]
async fn exchanges_assertion_and_caches_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "grant_type".into(),
                "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
            ),
            Matcher::Regex("assertion=".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"ya29.test","expires_in":3599,"token_type":"Bearer"}"#)
        .expect(1)
        .create_async()
        .await;

    let source = token_source(format!("{}/token", server.url()));

    assert_eq!(source.access_token().await.unwrap(), "ya29.test");
    // Second call is served from the cache.
    assert_eq!(source.access_token().await.unwrap(), "ya29.test");

    mock.assert_async().await;
}

#[tokio::test]
async fn near_expiry_token_is_refreshed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"short-lived","expires_in":30,"token_type":"Bearer"}"#)
        .expect(2)
        .create_async()
        .await;

    let source = token_source(format!("{}/token", server.url()));
    source.access_token().await.unwrap();
    source.access_token().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_grant_surfaces_description() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#)
        .create_async()
        .await;

    let err = token_source(format!("{}/token", server.url()))
        .access_token()
        .await
        .unwrap_err();

    assert!(matches!(err, GoogleError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "Invalid JWT Signature.");
}

#[tokio::test]
async fn out_of_range_expiry_is_unexpected_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"ya29.bad","expires_in":9223372036854775807}"#)
        .create_async()
        .await;

    let err = token_source(format!("{}/token", server.url()))
        .access_token()
        .await
        .unwrap_err();

    assert!(matches!(err, GoogleError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn fcm_send_uses_exchanged_token() {
    let mut server = mockito::Server::new_async().await;
    let _token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"ya29.fcm","expires_in":3599,"token_type":"Bearer"}"#)
        .create_async()
        .await;
    let send = server
        .mock("POST", "/v1/projects/beacon-test/messages:send")
        .match_header("authorization", "Bearer ya29.fcm")
        .with_status(200)
        .with_body(r#"{"name":"projects/beacon-test/messages/42"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(token_source(format!("{}/token", server.url())));
    let mut config = FcmConfig::new("beacon-test");
    config.base_url = server.url();
    let messenger = FcmMessenger::new(beacon_google::http_client().unwrap(), config, tokens);

    let id = messenger
        .send_message(&PushMessage::test_notification("device", "hi"))
        .await
        .unwrap();

    assert_eq!(id, "projects/beacon-test/messages/42");
    send.assert_async().await;
}
