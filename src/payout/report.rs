//! Report types produced by payout and repayment runs.
//!
//! Reports are ephemeral: computed per invocation from the attendance
//! snapshot and never persisted or mutated after construction. Field names
//! follow the wire format consumed by the hub dashboards (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One computed payment line per fellow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRow {
    pub fellow_id: Uuid,
    pub fellow_name: String,
    pub supervisor_id: Uuid,
    pub supervisor_name: String,
    pub mpesa_name: Option<String>,
    pub mpesa_number: Option<String>,
    pub presession_count: u32,
    pub session_count: u32,
    pub kes_payout_amount: i64,
}

impl PayoutRow {
    /// A row is payable only when both M-Pesa fields are present and
    /// non-blank; other rows still appear in reports so the hub team can
    /// chase the missing contact details.
    pub fn has_mpesa_info(&self) -> bool {
        !is_blank(&self.mpesa_name) && !is_blank(&self.mpesa_number)
    }
}

pub(crate) fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteRecords {
    pub count_missing_mpesa_name: u32,
    pub count_missing_mpesa_number: u32,
}

/// Result of one payout run for one implementer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutReport {
    pub payout_details: Vec<PayoutRow>,
    pub payout_period: PayoutPeriod,
    pub incomplete_records: IncompleteRecords,
    pub total_payout_amount: i64,
    pub total_payout_amount_with_mpesa_info: i64,
}

/// Id of a repayment request included in a reconciliation run. The caller
/// persists `fulfilled_at` for these after the report is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfilledRequest {
    pub id: Uuid,
}

/// Result of one repayment reconciliation run for one implementer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentReport {
    pub payout_details: Vec<PayoutRow>,
    pub total_repayment_amount: i64,
    pub repayment_requests_fulfilled: Vec<FulfilledRequest>,
    /// Requests whose referenced attendance record no longer resolves. They
    /// are excluded from the totals and left pending rather than silently
    /// dropped.
    pub unresolved_requests: u32,
}
