use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flagged correction against a previously computed payout. Pending while
/// both timestamps are null; consumed by setting `fulfilled_at` once the
/// referenced attendance has been reconciled into a new total.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RepaymentRequest {
    pub id: Uuid,
    pub fellow_attendance_id: Uuid,
    pub fulfilled_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
}

impl RepaymentRequest {
    pub fn is_pending(&self) -> bool {
        self.fulfilled_at.is_none() && self.rejected_at.is_none()
    }
}
