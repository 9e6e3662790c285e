use axum::extract::Query;
use axum::Extension;
use serde::Deserialize;

use crate::auth::Capability;
use crate::error::ApiError;
use crate::middleware::auth::Actor;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::payout::report::PayoutReport;
use crate::payout::window::PayoutDay;
use crate::services::PayoutService;

#[derive(Debug, Deserialize)]
pub struct PayoutReportQuery {
    pub day: String,
}

/// GET /api/reports/payouts?day=M|R - interactive payout report, scoped to
/// the actor's implementer. One capability check at the boundary; the
/// computation is identical to a scheduler-triggered run.
pub async fn payout_report(
    Extension(actor): Extension<Actor>,
    Query(query): Query<PayoutReportQuery>,
) -> ApiResult<PayoutReport> {
    if !actor.role.can(Capability::ViewPayouts) {
        return Err(ApiError::forbidden(
            "your role does not allow viewing payout reports",
        ));
    }

    let day = PayoutDay::from_code(&query.day).ok_or_else(|| {
        ApiError::bad_request(format!(
            "invalid day code '{}', expected \"M\" or \"R\"",
            query.day
        ))
    })?;

    let service = PayoutService::new().await?;
    let report = service.run_payout(actor.implementer_id, day).await?;

    Ok(ApiResponse::success(report))
}
