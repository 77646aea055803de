//! OAuth2 access tokens for Google APIs.
//!
//! [`ServiceAccountTokenSource`] implements the JWT-bearer grant: it signs an
//! RS256 assertion with the service account's private key, exchanges it at
//! the key's `token_uri`, and caches the resulting access token until shortly
//! before it expires.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::GoogleError;

/// OAuth2 scope for FCM HTTP v1.
pub const SCOPE_FIREBASE_MESSAGING: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// OAuth2 scope for Cloud Firestore.
pub const SCOPE_DATASTORE: &str = "https://www.googleapis.com/auth/datastore";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh cached tokens this long before their reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

// ---------------------------------------------------------------------------
// Service account key
// ---------------------------------------------------------------------------

/// The fields of a service-account JSON key file this crate needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: Option<String>,
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, GoogleError> {
        serde_json::from_str(json).map_err(|e| GoogleError::Credentials(e.to_string()))
    }

    /// Read and parse a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GoogleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GoogleError::Credentials(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

// ---------------------------------------------------------------------------
// Token sources
// ---------------------------------------------------------------------------

/// Supplies bearer tokens for outbound Google API requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, GoogleError>;
}

/// A fixed token, for emulators (which accept `owner`) and tests.
#[derive(Debug, Clone)]
pub struct StaticTokenSource(pub String);

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, GoogleError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges signed service-account assertions for access tokens.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Create a token source for `scopes`. Fails if the private key is not
    /// a valid RSA PEM.
    pub fn new(
        key: ServiceAccountKey,
        scopes: &[&str],
        client: reqwest::Client,
    ) -> Result<Self, GoogleError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(Self {
            key,
            encoding_key,
            scope: scopes.join(" "),
            client,
            cached: Mutex::new(None),
        })
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, GoogleError> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<CachedToken, GoogleError> {
        let assertion = self.sign_assertion(now)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let response = GoogleError::check(response).await?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| GoogleError::UnexpectedResponse(e.to_string()))?;

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = body.expires_in,
            "Fetched Google access token"
        );

        let expires_at = Duration::try_seconds(body.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                GoogleError::UnexpectedResponse(format!(
                    "expires_in out of range: {}",
                    body.expires_in
                ))
            })?;

        Ok(CachedToken {
            token: body.access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, GoogleError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.fetch(now).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}
