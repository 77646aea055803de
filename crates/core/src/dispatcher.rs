//! The notification dispatcher: identity check, validation, recipient lookup,
//! token check, single send, error translation.
//!
//! Every step is terminal on failure and nothing is mutated before the send,
//! so there is no rollback. At most one send is attempted per call and the
//! caller owns any retry.

use std::sync::Arc;

use crate::error::CoreError;
use crate::notification::{DispatchReceipt, NotificationRequest, PushMessage};
use crate::ports::{MessagingProvider, ProfileStore};
use crate::types::CallerIdentity;

/// Sends test push notifications to a user's registered device.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn ProfileStore>,
    messenger: Arc<dyn MessagingProvider>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn ProfileStore>, messenger: Arc<dyn MessagingProvider>) -> Self {
        Self { store, messenger }
    }

    /// Handle a single call. Logs one line on failure.
    pub async fn dispatch(
        &self,
        caller: Option<&CallerIdentity>,
        request: NotificationRequest,
    ) -> Result<DispatchReceipt, CoreError> {
        let caller_uid = caller.map(|c| c.uid.clone());

        match self.run(caller, request).await {
            Ok(receipt) => {
                tracing::debug!(
                    caller = ?caller_uid,
                    message_id = %receipt.message_id,
                    "Test notification sent"
                );
                Ok(receipt)
            }
            Err(err) if err.is_client_error() => {
                tracing::warn!(
                    caller = ?caller_uid,
                    code = err.code(),
                    error = %err.message(),
                    "Test notification rejected"
                );
                Err(err)
            }
            Err(err) => {
                tracing::error!(
                    caller = ?caller_uid,
                    error = %err.message(),
                    "Error sending test notification"
                );
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        caller: Option<&CallerIdentity>,
        request: NotificationRequest,
    ) -> Result<DispatchReceipt, CoreError> {
        if caller.is_none() {
            return Err(CoreError::Unauthenticated(
                "User must be authenticated".into(),
            ));
        }

        let request = request.validated()?;

        let record = self
            .store
            .find_recipient(&request.receiver_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?
            .ok_or_else(|| CoreError::NotFound("Receiver not found".into()))?;

        let token = record.deliverable_token().ok_or_else(|| {
            CoreError::FailedPrecondition("Receiver has no FCM token".into())
        })?;

        let message = PushMessage::test_notification(token, &request.message);

        let message_id = self
            .messenger
            .send(&message)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        Ok(DispatchReceipt::sent(message_id))
    }
}
