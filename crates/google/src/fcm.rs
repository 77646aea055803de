//! Firebase Cloud Messaging over the HTTP v1 API.

use std::sync::Arc;

use async_trait::async_trait;
use beacon_core::notification::PushMessage;
use beacon_core::ports::{MessagingProvider, PortError};
use beacon_core::types::MessageId;
use serde::{Deserialize, Serialize};

use crate::credentials::AccessTokenSource;
use crate::error::GoogleError;

/// Production FCM endpoint.
pub const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";

#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub project_id: String,
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Ask FCM to validate the message without delivering it.
    pub validate_only: bool,
}

impl FcmConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: DEFAULT_FCM_BASE_URL.to_string(),
            validate_only: false,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    validate_only: bool,
    message: &'a PushMessage,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

/// Sends [`PushMessage`]s through FCM.
pub struct FcmMessenger {
    client: reqwest::Client,
    config: FcmConfig,
    tokens: Arc<dyn AccessTokenSource>,
}

impl FcmMessenger {
    pub fn new(
        client: reqwest::Client,
        config: FcmConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            config,
            tokens,
        }
    }

    /// Send one message and return FCM's message name
    /// (`projects/{project}/messages/{id}`).
    pub async fn send_message(&self, message: &PushMessage) -> Result<String, GoogleError> {
        let access_token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(self.config.send_url())
            .bearer_auth(access_token)
            .json(&SendRequest {
                validate_only: self.config.validate_only,
                message,
            })
            .send()
            .await?;
        let response = GoogleError::check(response).await?;

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| GoogleError::UnexpectedResponse(e.to_string()))?;
        Ok(body.name)
    }
}

#[async_trait]
impl MessagingProvider for FcmMessenger {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, PortError> {
        Ok(self.send_message(message).await?)
    }
}
