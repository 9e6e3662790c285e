use axum::extract::Path;
use uuid::Uuid;

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::payout::report::RepaymentReport;
use crate::services::PayoutService;

/// POST /api/repayments/:implementer_id - reconcile the pending repayment
/// backlog for one implementer and mark the included requests fulfilled.
pub async fn run_one(Path(implementer_id): Path<Uuid>) -> ApiResult<RepaymentReport> {
    let service = PayoutService::new().await?;
    let implementer = service.require_active_implementer(implementer_id).await?;
    let report = service.run_repayments(implementer.id).await?;

    Ok(ApiResponse::success(report))
}
