use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One attendance event: a fellow marked present or absent for one scheduled
/// session by their supervisor.
///
/// Fellow and supervisor identity plus M-Pesa contact fields are denormalized
/// into the row at query time so the aggregator can run without further
/// lookups. The session type is kept as the raw stored label; historic rows
/// carry legacy labels with no rate-table entry and must still aggregate.
///
/// Records are treated as an immutable snapshot for the duration of one
/// payout computation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub fellow_id: Uuid,
    pub supervisor_id: Uuid,
    pub session_id: Uuid,
    pub school_id: Uuid,
    pub session_type: String,
    pub attended: bool,
    pub occurred_at: DateTime<Utc>,
    pub fellow_name: String,
    pub supervisor_name: String,
    pub mpesa_name: Option<String>,
    pub mpesa_number: Option<String>,
}
