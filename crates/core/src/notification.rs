//! Request, recipient, and push-payload types for the test notification call.
//!
//! [`PushMessage`] serializes directly to the FCM HTTP v1 `Message` shape, so
//! messaging adapters can post it without further mapping.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{MessageId, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Notification title shown on the device.
pub const TEST_NOTIFICATION_TITLE: &str = "Test Notification";

/// Value of `data.type` for test notifications.
pub const TEST_NOTIFICATION_TYPE: &str = "test";

/// Client-side routing hint understood by the Flutter messaging plugin.
pub const FLUTTER_CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Android notification channel the app registers for chat messages.
pub const CHAT_CHANNEL_ID: &str = "chat_notifications";

/// Confirmation string returned on a successful send.
pub const SENT_CONFIRMATION: &str = "Test notification sent successfully";

const MISSING_FIELDS: &str = "receiverId and message are required";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Raw caller payload. Fields stay optional until [`NotificationRequest::validated`]
/// so that identity checks can run before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct NotificationRequest {
    #[validate(length(min = 1))]
    pub receiver_id: Option<String>,
    #[validate(length(min = 1))]
    pub message: Option<String>,
}

/// A request whose fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub receiver_id: UserId,
    pub message: String,
}

impl NotificationRequest {
    pub fn new(receiver_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            receiver_id: Some(receiver_id.into()),
            message: Some(message.into()),
        }
    }

    /// Extract `receiverId` and `message` from an arbitrary JSON payload.
    ///
    /// Missing or non-string values become `None`; anything that is not an
    /// object yields an empty request.
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };

        Self {
            receiver_id: field("receiverId"),
            message: field("message"),
        }
    }

    /// Require both fields to be present and non-empty.
    ///
    /// Whitespace is not trimmed; the message is carried verbatim.
    pub fn validated(self) -> Result<ValidatedRequest, CoreError> {
        if self.validate().is_err() {
            return Err(CoreError::InvalidArgument(MISSING_FIELDS.into()));
        }

        let (Some(receiver_id), Some(message)) = (self.receiver_id, self.message) else {
            return Err(CoreError::InvalidArgument(MISSING_FIELDS.into()));
        };

        Ok(ValidatedRequest {
            receiver_id,
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// The slice of a user profile this service reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    pub fcm_token: Option<String>,
}

impl RecipientRecord {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            fcm_token: Some(token.into()),
        }
    }

    /// The push token, if one is stored and non-empty.
    pub fn deliverable_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Push payload
// ---------------------------------------------------------------------------

/// A single push message addressed to one device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub token: String,
    pub notification: PushNotification,
    pub data: PushData,
    pub android: AndroidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// Structured data block delivered to the client app alongside the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushData {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub click_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidNotification {
    pub channel_id: String,
    #[serde(rename = "notification_priority")]
    pub priority: NotificationPriority,
}

/// Android display priority, serialized as the FCM v1 enum names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationPriority {
    #[serde(rename = "PRIORITY_MIN")]
    Min,
    #[serde(rename = "PRIORITY_LOW")]
    Low,
    #[serde(rename = "PRIORITY_DEFAULT")]
    Default,
    #[serde(rename = "PRIORITY_HIGH")]
    High,
    #[serde(rename = "PRIORITY_MAX")]
    Max,
}

impl PushMessage {
    /// Build the test notification for `token`, echoing `message` in both the
    /// visible body and the data block.
    pub fn test_notification(token: &str, message: &str) -> Self {
        Self {
            token: token.to_string(),
            notification: PushNotification {
                title: TEST_NOTIFICATION_TITLE.to_string(),
                body: message.to_string(),
            },
            data: PushData {
                kind: TEST_NOTIFICATION_TYPE.to_string(),
                message: message.to_string(),
                click_action: FLUTTER_CLICK_ACTION.to_string(),
            },
            android: AndroidConfig {
                notification: AndroidNotification {
                    channel_id: CHAT_CHANNEL_ID.to_string(),
                    priority: NotificationPriority::High,
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Successful dispatch result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    pub success: bool,
    pub message_id: MessageId,
    pub message: String,
}

impl DispatchReceipt {
    pub fn sent(message_id: MessageId) -> Self {
        Self {
            success: true,
            message_id,
            message: SENT_CONFIRMATION.to_string(),
        }
    }
}
