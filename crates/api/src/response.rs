//! Success envelope for callable handlers.
//!
//! Callable responses wrap their payload as `{ "result": ... }`. Use
//! [`CallableResponse`] instead of ad-hoc `serde_json::json!({ "result": ... })`.

use serde::Serialize;

/// Standard `{ "result": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(CallableResponse { result: receipt }))
/// ```
#[derive(Debug, Serialize)]
pub struct CallableResponse<T: Serialize> {
    pub result: T,
}
