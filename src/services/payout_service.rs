use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::implementer::Implementer;
use crate::payout::aggregator::aggregate;
use crate::payout::reconciler::reconcile;
use crate::payout::report::{PayoutReport, RepaymentReport};
use crate::payout::window::{window_for, PayoutDay};

use super::attendance_service::{AttendanceService, AttendanceSource};
use super::repayment_service::RepaymentService;

/// One entry of the batch trigger's result array: either a report or a
/// captured failure for that implementer. Callers must check each entry's
/// shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImplementerRunResult {
    #[serde(rename_all = "camelCase")]
    Report {
        implementer_id: Uuid,
        implementer_name: String,
        report: PayoutReport,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        implementer_id: Uuid,
        implementer_name: String,
        error: String,
    },
}

/// Orchestrates payout and repayment runs: window selection, fetch,
/// aggregation, and (for repayments) fulfilment marking.
#[derive(Clone)]
pub struct PayoutService {
    pool: PgPool,
    attendance: AttendanceService,
    repayments: RepaymentService,
}

impl PayoutService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self::with_pool(pool))
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            attendance: AttendanceService::with_pool(pool.clone()),
            repayments: RepaymentService::with_pool(pool.clone()),
            pool,
        }
    }

    /// One payout run for one implementer. The attendance snapshot is
    /// read-only; the run writes nothing.
    pub async fn run_payout(
        &self,
        implementer_id: Uuid,
        day: PayoutDay,
    ) -> Result<PayoutReport, DatabaseError> {
        let period = window_for(day, Utc::now().date_naive());
        let records = self
            .attendance
            .attendance_for_window(implementer_id, &period)
            .await?;

        tracing::info!(
            %implementer_id,
            day = day.code(),
            records = records.len(),
            "running payout aggregation"
        );

        Ok(aggregate(&records, period))
    }

    /// One repayment reconciliation run for one implementer. Recomputes the
    /// corrected totals, then marks the included requests fulfilled.
    pub async fn run_repayments(
        &self,
        implementer_id: Uuid,
    ) -> Result<RepaymentReport, DatabaseError> {
        let requests = self.repayments.pending_requests(implementer_id).await?;
        let attendance_ids: Vec<Uuid> =
            requests.iter().map(|r| r.fellow_attendance_id).collect();
        let resolved = self.repayments.resolve_attendance(&attendance_ids).await?;

        let report = reconcile(&requests, &resolved);

        let fulfilled_ids: Vec<Uuid> = report
            .repayment_requests_fulfilled
            .iter()
            .map(|f| f.id)
            .collect();
        let marked = self.repayments.mark_fulfilled(&fulfilled_ids).await?;

        tracing::info!(
            %implementer_id,
            fulfilled = marked,
            unresolved = report.unresolved_requests,
            total_kes = report.total_repayment_amount,
            "repayment reconciliation complete"
        );

        Ok(report)
    }

    /// Look up one active implementer, or fail with `NotFound`. Single-
    /// implementer triggers call this first so an unknown id surfaces as an
    /// explicit 404 instead of an empty report that reads as "no payouts
    /// owed".
    pub async fn require_active_implementer(
        &self,
        implementer_id: Uuid,
    ) -> Result<Implementer, DatabaseError> {
        let implementer = sqlx::query_as::<_, Implementer>(
            "SELECT id, name, is_active FROM implementers WHERE id = $1 AND is_active = TRUE",
        )
        .bind(implementer_id)
        .fetch_optional(&self.pool)
        .await?;

        implementer.ok_or_else(|| {
            DatabaseError::NotFound(format!("implementer {} not found", implementer_id))
        })
    }

    pub async fn active_implementers(&self) -> Result<Vec<Implementer>, DatabaseError> {
        let implementers = sqlx::query_as::<_, Implementer>(
            "SELECT id, name, is_active FROM implementers WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(implementers)
    }

    /// Fan the payout run out over every active implementer with bounded
    /// concurrency. Each sub-run is an isolated failure domain: an error is
    /// captured into that implementer's entry and never aborts the rest.
    pub async fn run_payout_batch(
        &self,
        day: PayoutDay,
    ) -> Result<Vec<ImplementerRunResult>, DatabaseError> {
        let implementers = self.active_implementers().await?;
        let concurrency = config::config().payout.fanout_concurrency.max(1);

        let results = stream::iter(implementers.into_iter().map(|implementer| {
            let service = self.clone();
            async move {
                match service.run_payout(implementer.id, day).await {
                    Ok(report) => ImplementerRunResult::Report {
                        implementer_id: implementer.id,
                        implementer_name: implementer.name,
                        report,
                    },
                    Err(e) => {
                        tracing::error!(
                            implementer_id = %implementer.id,
                            error = %e,
                            "payout run failed for implementer"
                        );
                        ImplementerRunResult::Failed {
                            implementer_id: implementer.id,
                            implementer_name: implementer.name,
                            error: e.to_string(),
                        }
                    }
                }
            }
        }))
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

        Ok(results)
    }
}
