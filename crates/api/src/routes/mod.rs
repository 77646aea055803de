pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notifications/test          send a test push notification (POST, callable)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications/test",
        post(handlers::notification::send_test_notification),
    )
}

/// Root-level callable routes, named the way Firebase clients address
/// functions (`/{functionName}`).
pub fn callable_routes() -> Router<AppState> {
    Router::new().route(
        "/testNotification",
        post(handlers::notification::send_test_notification),
    )
}
