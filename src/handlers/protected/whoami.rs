use axum::Extension;

use crate::middleware::auth::Actor;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/auth/whoami - echo the authenticated actor
pub async fn whoami(Extension(actor): Extension<Actor>) -> ApiResult<Actor> {
    Ok(ApiResponse::success(actor))
}
