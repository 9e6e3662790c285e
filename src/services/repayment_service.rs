use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::attendance::AttendanceRecord;
use crate::database::models::repayment::RepaymentRequest;

/// Fetches pending repayment requests and persists fulfilment marks. The
/// recomputation itself lives in `payout::reconciler` and stays pure.
#[derive(Clone)]
pub struct RepaymentService {
    pool: PgPool,
}

impl RepaymentService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Backlog for one implementer: requests with neither `fulfilled_at` nor
    /// `rejected_at` set.
    pub async fn pending_requests(
        &self,
        implementer_id: Uuid,
    ) -> Result<Vec<RepaymentRequest>, DatabaseError> {
        let requests = sqlx::query_as::<_, RepaymentRequest>(
            r#"
            SELECT id, fellow_attendance_id, fulfilled_at, rejected_at
            FROM repayment_requests
            WHERE implementer_id = $1
              AND fulfilled_at IS NULL
              AND rejected_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(implementer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Resolve the attendance records referenced by a set of requests.
    /// Dangling references simply do not appear in the returned map.
    pub async fn resolve_attendance(
        &self,
        attendance_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AttendanceRecord>, DatabaseError> {
        if attendance_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT a.id, a.fellow_id, a.supervisor_id, a.session_id, a.school_id,
                   a.session_type, a.attended, a.occurred_at,
                   f.full_name AS fellow_name,
                   s.full_name AS supervisor_name,
                   f.mpesa_name, f.mpesa_number
            FROM fellow_attendance a
            JOIN fellows f ON f.id = a.fellow_id
            JOIN supervisors s ON s.id = a.supervisor_id
            WHERE a.id = ANY($1)
            "#,
        )
        .bind(attendance_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }

    /// Mark a set of requests fulfilled. Scoped by primary key and guarded on
    /// `fulfilled_at IS NULL`, so re-marking under at-least-once delivery is
    /// a no-op rather than an error. Returns how many rows actually changed.
    pub async fn mark_fulfilled(&self, request_ids: &[Uuid]) -> Result<u64, DatabaseError> {
        if request_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE repayment_requests
            SET fulfilled_at = NOW()
            WHERE id = ANY($1)
              AND fulfilled_at IS NULL
            "#,
        )
        .bind(request_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
