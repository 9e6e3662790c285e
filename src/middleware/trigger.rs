use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::config;
use crate::error::ApiError;

use super::auth::extract_bearer_token;

/// Shared-secret bearer check for the payout trigger surface.
///
/// Trigger routes are invoked by an external scheduler, not by user
/// sessions, so they authenticate against a deployment-level secret. The
/// check runs before any computation; a bad or missing secret never reaches
/// the datastore.
pub async fn trigger_auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let secret = &config::config().security.trigger_secret;

    if secret.is_empty() {
        return Err(reject("Payout trigger secret not configured"));
    }

    let token = extract_bearer_token(&headers).map_err(reject)?;

    if token != *secret {
        return Err(reject("Invalid payout trigger secret"));
    }

    Ok(next.run(request).await)
}

fn reject(msg: impl Into<String>) -> (StatusCode, Json<serde_json::Value>) {
    let api_error = ApiError::unauthorized(msg.into());
    (
        StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
        Json(api_error.to_json()),
    )
}
