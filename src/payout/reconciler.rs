//! Repayment reconciliation.
//!
//! Pending repayment requests each point at one attendance record believed
//! to have been mis-paid. Reconciliation resolves those records and re-runs
//! the payout fold over them, producing the corrected totals. The reconciler
//! is pure: it never writes; the caller persists `fulfilled_at` for the
//! request ids named in the report, with an idempotent key-scoped update.

use std::collections::HashMap;

use uuid::Uuid;

use crate::database::models::attendance::AttendanceRecord;
use crate::database::models::repayment::RepaymentRequest;
use crate::payout::aggregator::fold_rows;
use crate::payout::report::{FulfilledRequest, RepaymentReport};

/// Re-run the payout fold over the attendance referenced by `requests`.
///
/// `resolved` maps attendance id to the resolved record. Requests whose
/// reference is missing from the map are skipped from the aggregation and
/// counted in `unresolved_requests`; they stay pending. Two requests
/// pointing at the same attendance record feed it through the fold once but
/// are both reported fulfilled.
pub fn reconcile(
    requests: &[RepaymentRequest],
    resolved: &HashMap<Uuid, AttendanceRecord>,
) -> RepaymentReport {
    let mut records: Vec<AttendanceRecord> = Vec::new();
    let mut seen_attendance: Vec<Uuid> = Vec::new();
    let mut fulfilled: Vec<FulfilledRequest> = Vec::new();
    let mut unresolved: u32 = 0;

    for request in requests {
        if !request.is_pending() {
            continue;
        }
        match resolved.get(&request.fellow_attendance_id) {
            Some(record) => {
                if !seen_attendance.contains(&request.fellow_attendance_id) {
                    seen_attendance.push(request.fellow_attendance_id);
                    records.push(record.clone());
                }
                fulfilled.push(FulfilledRequest { id: request.id });
            }
            None => {
                tracing::warn!(
                    request_id = %request.id,
                    attendance_id = %request.fellow_attendance_id,
                    "repayment request references missing attendance, leaving pending"
                );
                unresolved += 1;
            }
        }
    }

    let payout_details = fold_rows(&records);
    let total_repayment_amount = payout_details.iter().map(|r| r.kes_payout_amount).sum();

    RepaymentReport {
        payout_details,
        total_repayment_amount,
        repayment_requests_fulfilled: fulfilled,
        unresolved_requests: unresolved,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn attendance(id: u128, fellow: u128, session_type: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::from_u128(id),
            fellow_id: Uuid::from_u128(fellow),
            supervisor_id: Uuid::from_u128(900),
            session_id: Uuid::new_v4(),
            school_id: Uuid::from_u128(800),
            session_type: session_type.to_string(),
            attended: true,
            occurred_at: Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap(),
            fellow_name: format!("Fellow {}", fellow),
            supervisor_name: "Super Visor".to_string(),
            mpesa_name: Some(format!("Fellow {}", fellow)),
            mpesa_number: Some("0700000000".to_string()),
        }
    }

    fn request(id: u128, attendance_id: u128) -> RepaymentRequest {
        RepaymentRequest {
            id: Uuid::from_u128(id),
            fellow_attendance_id: Uuid::from_u128(attendance_id),
            fulfilled_at: None,
            rejected_at: None,
        }
    }

    #[test]
    fn resolved_requests_recompute_and_report_fulfilled_ids() {
        let requests = vec![request(1, 10), request(2, 11)];
        let resolved: HashMap<_, _> = [
            (Uuid::from_u128(10), attendance(10, 1, "Session01")),
            (Uuid::from_u128(11), attendance(11, 1, "Presession")),
        ]
        .into_iter()
        .collect();

        let report = reconcile(&requests, &resolved);

        assert_eq!(report.total_repayment_amount, 1500);
        assert_eq!(report.payout_details.len(), 1);
        assert_eq!(report.unresolved_requests, 0);
        let ids: Vec<_> = report
            .repayment_requests_fulfilled
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[test]
    fn reconciliation_is_idempotent_without_marking() {
        let requests = vec![request(1, 10), request(2, 11)];
        let resolved: HashMap<_, _> = [
            (Uuid::from_u128(10), attendance(10, 1, "Session01")),
            (Uuid::from_u128(11), attendance(11, 2, "Session02")),
        ]
        .into_iter()
        .collect();

        let first = reconcile(&requests, &resolved);
        let second = reconcile(&requests, &resolved);
        assert_eq!(first, second);
    }

    #[test]
    fn dangling_reference_is_skipped_and_counted() {
        let requests = vec![request(1, 10), request(2, 99)];
        let resolved: HashMap<_, _> =
            [(Uuid::from_u128(10), attendance(10, 1, "Session01"))]
                .into_iter()
                .collect();

        let report = reconcile(&requests, &resolved);

        assert_eq!(report.total_repayment_amount, 1000);
        assert_eq!(report.unresolved_requests, 1);
        assert_eq!(report.repayment_requests_fulfilled.len(), 1);
        assert_eq!(report.repayment_requests_fulfilled[0].id, Uuid::from_u128(1));
    }

    #[test]
    fn duplicate_references_count_the_attendance_once() {
        let requests = vec![request(1, 10), request(2, 10)];
        let resolved: HashMap<_, _> =
            [(Uuid::from_u128(10), attendance(10, 1, "Session01"))]
                .into_iter()
                .collect();

        let report = reconcile(&requests, &resolved);

        assert_eq!(report.total_repayment_amount, 1000);
        assert_eq!(report.repayment_requests_fulfilled.len(), 2);
    }

    #[test]
    fn already_fulfilled_requests_are_ignored() {
        let mut done = request(1, 10);
        done.fulfilled_at = Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
        let resolved: HashMap<_, _> =
            [(Uuid::from_u128(10), attendance(10, 1, "Session01"))]
                .into_iter()
                .collect();

        let report = reconcile(&[done], &resolved);

        assert_eq!(report.total_repayment_amount, 0);
        assert!(report.repayment_requests_fulfilled.is_empty());
        assert_eq!(report.unresolved_requests, 0);
    }
}
