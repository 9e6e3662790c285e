use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level organization running the program. Implementers are the tenant
/// boundary: every payout and repayment run is scoped to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Implementer {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}
