use std::time::Duration;

use axum::extract::{Path, Query};
use serde::Deserialize;
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::payout::report::PayoutReport;
use crate::payout::window::PayoutDay;
use crate::services::{ImplementerRunResult, PayoutService};

#[derive(Debug, Deserialize)]
pub struct PayoutRunQuery {
    /// Day code from the scheduler: "M" (mid-month) or "R" (end-of-month).
    pub day: String,
}

fn parse_day(code: &str) -> Result<PayoutDay, ApiError> {
    PayoutDay::from_code(code).ok_or_else(|| {
        ApiError::bad_request(format!("invalid day code '{}', expected \"M\" or \"R\"", code))
    })
}

/// POST /api/payouts/:implementer_id?day=M|R - payout run for one implementer
pub async fn run_one(
    Path(implementer_id): Path<Uuid>,
    Query(query): Query<PayoutRunQuery>,
) -> ApiResult<PayoutReport> {
    let day = parse_day(&query.day)?;

    let service = PayoutService::new().await?;
    let implementer = service.require_active_implementer(implementer_id).await?;
    let report = service.run_payout(implementer.id, day).await?;

    Ok(ApiResponse::success(report))
}

/// POST /api/payouts?day=M|R - fan the run out over all active implementers.
///
/// Returns one entry per implementer; failed sub-runs appear as error entries
/// interleaved with reports. The whole batch runs under a bounded timeout.
pub async fn run_all(
    Query(query): Query<PayoutRunQuery>,
) -> ApiResult<Vec<ImplementerRunResult>> {
    let day = parse_day(&query.day)?;

    let service = PayoutService::new().await?;
    let budget = Duration::from_secs(config::config().payout.fanout_timeout_secs);

    let results = tokio::time::timeout(budget, service.run_payout_batch(day))
        .await
        .map_err(|_| ApiError::gateway_timeout("payout batch exceeded its time budget"))??;

    Ok(ApiResponse::success(results))
}
