//! Caller identity extractor for callable handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use beacon_core::types::CallerIdentity;

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// The caller's identity, if the request carried a valid Bearer token.
///
/// Never rejects: a missing, malformed, or invalid token yields `Caller(None)`
/// and the dispatcher reports `unauthenticated`.
///
/// ```ignore
/// async fn my_handler(Caller(caller): Caller) -> AppResult<Json<()>> {
///     tracing::info!(caller = ?caller, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub Option<CallerIdentity>);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(Caller(None));
        };

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            tracing::debug!("Authorization header is not a Bearer token");
            return Ok(Caller(None));
        };

        match validate_token(token, &state.config.jwt) {
            Ok(claims) => Ok(Caller(Some(CallerIdentity::new(claims.sub)))),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected caller token");
                Ok(Caller(None))
            }
        }
    }
}
