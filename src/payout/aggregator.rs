//! Attendance-to-payout aggregation.
//!
//! A pure fold from a window of attendance records into one payment row per
//! fellow. The fold is commutative and associative over integer addition, so
//! totals are independent of input order and the same records can be split
//! across calls and summed. No I/O, no clock, no floats.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::database::models::attendance::AttendanceRecord;
use crate::payout::rates::SessionType;
use crate::payout::report::{
    is_blank, IncompleteRecords, PayoutPeriod, PayoutReport, PayoutRow,
};

/// Fold attendance records into one row per distinct fellow.
///
/// Only records with `attended == true` contribute. Known session types add
/// their rate and bump the presession or session counter; unknown/legacy
/// labels contribute zero and bump nothing. The row's identity and M-Pesa
/// fields come from the first record seen for that fellow.
pub fn fold_rows(records: &[AttendanceRecord]) -> Vec<PayoutRow> {
    // BTreeMap keyed by fellow id keeps output deterministic.
    let mut rows: BTreeMap<Uuid, PayoutRow> = BTreeMap::new();

    for record in records {
        let row = rows.entry(record.fellow_id).or_insert_with(|| PayoutRow {
            fellow_id: record.fellow_id,
            fellow_name: record.fellow_name.clone(),
            supervisor_id: record.supervisor_id,
            supervisor_name: record.supervisor_name.clone(),
            mpesa_name: record.mpesa_name.clone(),
            mpesa_number: record.mpesa_number.clone(),
            presession_count: 0,
            session_count: 0,
            kes_payout_amount: 0,
        });

        if !record.attended {
            continue;
        }

        match SessionType::from_label(&record.session_type) {
            Some(session_type) => {
                if session_type.is_presession() {
                    row.presession_count += 1;
                } else {
                    row.session_count += 1;
                }
                row.kes_payout_amount += session_type.rate_kes();
            }
            None => {
                tracing::warn!(
                    fellow_id = %record.fellow_id,
                    session_type = %record.session_type,
                    "unknown session type in attendance, rating at 0"
                );
            }
        }
    }

    rows.into_values().collect()
}

/// Build the full payout report for one implementer's window of records.
pub fn aggregate(records: &[AttendanceRecord], period: PayoutPeriod) -> PayoutReport {
    let payout_details = fold_rows(records);

    let mut incomplete = IncompleteRecords::default();
    let mut total: i64 = 0;
    let mut total_with_mpesa: i64 = 0;

    for row in &payout_details {
        total += row.kes_payout_amount;
        if row.has_mpesa_info() {
            total_with_mpesa += row.kes_payout_amount;
        }
        if is_blank(&row.mpesa_name) {
            incomplete.count_missing_mpesa_name += 1;
        }
        if is_blank(&row.mpesa_number) {
            incomplete.count_missing_mpesa_number += 1;
        }
    }

    PayoutReport {
        payout_details,
        payout_period: period,
        incomplete_records: incomplete,
        total_payout_amount: total,
        total_payout_amount_with_mpesa_info: total_with_mpesa,
    }
}
