//! Handler for the test-notification callable.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use beacon_core::notification::{DispatchReceipt, NotificationRequest};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::Caller;
use crate::response::CallableResponse;
use crate::state::AppState;

/// Callable request envelope: `{ "data": { "receiverId": ..., "message": ... } }`.
#[derive(Debug, Default, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: serde_json::Value,
}

/// POST /api/v1/notifications/test (also POST /testNotification)
///
/// Send a test push notification to `receiverId`'s registered device.
/// An unreadable body is treated as an empty payload so the caller's
/// identity is still checked first.
pub async fn send_test_notification(
    Caller(caller): Caller,
    State(state): State<AppState>,
    body: Result<Json<CallableRequest>, JsonRejection>,
) -> AppResult<Json<CallableResponse<DispatchReceipt>>> {
    let payload = match body {
        Ok(Json(envelope)) => envelope.data,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable callable body");
            serde_json::Value::Null
        }
    };

    let request = NotificationRequest::from_payload(&payload);
    let receipt = state.dispatcher.dispatch(caller.as_ref(), request).await?;

    Ok(Json(CallableResponse { result: receipt }))
}
