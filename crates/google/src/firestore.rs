//! Read-only user profile lookups against the Cloud Firestore REST API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use beacon_core::notification::RecipientRecord;
use beacon_core::ports::{PortError, ProfileStore};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::credentials::AccessTokenSource;
use crate::error::GoogleError;

/// Production Firestore endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Database id used when none is configured.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Collection holding user profiles.
pub const USERS_COLLECTION: &str = "users";

/// Document field holding the device push token.
const FCM_TOKEN_FIELD: &str = "fcmToken";

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    /// Scheme and host, without a trailing slash. Points at the emulator in
    /// local development.
    pub base_url: String,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
        }
    }

    /// URL of `users/{user_id}`. The id is percent-encoded as one path segment.
    fn user_document_url(&self, user_id: &str) -> Result<Url, GoogleError> {
        let collection = format!(
            "{}/v1/projects/{}/databases/{}/documents/{USERS_COLLECTION}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
        );
        let mut url = Url::parse(&collection)
            .map_err(|e| GoogleError::InvalidUrl(format!("{collection}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| GoogleError::InvalidUrl(collection.clone()))?
            .push(user_id);
        Ok(url)
    }
}

/// Firestore `Document` resource; only `fields` is read.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: HashMap<String, serde_json::Value>,
}

impl Document {
    /// A typed Firestore value is `{"stringValue": "..."}`; any other value
    /// kind (null, integer, ...) counts as no token.
    fn into_record(self) -> RecipientRecord {
        let fcm_token = self
            .fields
            .get(FCM_TOKEN_FIELD)
            .and_then(|value| value.get("stringValue"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        RecipientRecord { fcm_token }
    }
}

/// [`ProfileStore`] reading `users/{id}` documents.
pub struct FirestoreProfileStore {
    client: reqwest::Client,
    config: FirestoreConfig,
    tokens: Arc<dyn AccessTokenSource>,
}

impl FirestoreProfileStore {
    pub fn new(
        client: reqwest::Client,
        config: FirestoreConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            config,
            tokens,
        }
    }

    /// Fetch the user's document, returning `None` when it does not exist.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<RecipientRecord>, GoogleError> {
        // Not valid document ids; as path segments they would resolve to the collection.
        if matches!(user_id, "." | "..") {
            return Ok(None);
        }
        let url = self.config.user_document_url(user_id)?;
        let access_token = self.tokens.access_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = GoogleError::check(response).await?;

        let document: Document = response
            .json()
            .await
            .map_err(|e| GoogleError::UnexpectedResponse(e.to_string()))?;
        Ok(Some(document.into_record()))
    }
}

#[async_trait]
impl ProfileStore for FirestoreProfileStore {
    async fn find_recipient(
        &self,
        receiver_id: &str,
    ) -> Result<Option<RecipientRecord>, PortError> {
        Ok(self.get_user(receiver_id).await?)
    }
}
