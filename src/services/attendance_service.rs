use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::attendance::AttendanceRecord;
use crate::payout::report::PayoutPeriod;

/// Read-only source of attendance events for payout computation. The seam
/// exists so the aggregation pipeline can be driven from a fixture in tests.
#[async_trait]
pub trait AttendanceSource {
    /// All attendance for one implementer inside the payout window, with
    /// fellow and supervisor identity denormalized into each row.
    async fn attendance_for_window(
        &self,
        implementer_id: Uuid,
        period: &PayoutPeriod,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError>;
}

#[derive(Clone)]
pub struct AttendanceService {
    pool: PgPool,
}

impl AttendanceService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceSource for AttendanceService {
    async fn attendance_for_window(
        &self,
        implementer_id: Uuid,
        period: &PayoutPeriod,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        let (start, end) = window_bounds(period);

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
            WHERE f.implementer_id = $1
              AND a.occurred_at >= $2
              AND a.occurred_at < $3
            ORDER BY a.occurred_at
            "#,
        )
        .bind(implementer_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

/// Half-open UTC timestamp bounds for a calendar-date window.
fn window_bounds(period: &PayoutPeriod) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        start_of_day(period.start_date),
        start_of_day(period.end_date + Days::new(1)),
    )
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;
    use crate::payout::aggregator::aggregate;

    /// In-memory source standing in for the database in pipeline tests.
    struct FixtureSource {
        records: Vec<AttendanceRecord>,
    }

    #[async_trait]
    impl AttendanceSource for FixtureSource {
        async fn attendance_for_window(
            &self,
            _implementer_id: Uuid,
            period: &PayoutPeriod,
        ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
            let (start, end) = window_bounds(period);
            Ok(self
                .records
                .iter()
                .filter(|r| r.occurred_at >= start && r.occurred_at < end)
                .cloned()
                .collect())
        }
    }

    fn fixture_record(day: u32, session_type: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            fellow_id: Uuid::from_u128(1),
            supervisor_id: Uuid::from_u128(900),
            session_id: Uuid::new_v4(),
            school_id: Uuid::from_u128(800),
            session_type: session_type.to_string(),
            attended: true,
            occurred_at: Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap(),
            fellow_name: "Fellow One".to_string(),
            supervisor_name: "Super Visor".to_string(),
            mpesa_name: Some("Fellow One".to_string()),
            mpesa_number: Some("0700000000".to_string()),
        }
    }

    #[tokio::test]
    async fn fixture_source_drives_the_aggregation_pipeline() {
        let source = FixtureSource {
            records: vec![
                fixture_record(2, "Presession"),
                fixture_record(10, "Session01"),
                // Outside the mid-month window, must not be fetched.
                fixture_record(20, "Session02"),
            ],
        };
        let period = PayoutPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };

        let records = source
            .attendance_for_window(Uuid::from_u128(7), &period)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);

        let report = aggregate(&records, period);
        assert_eq!(report.payout_details.len(), 1);
        assert_eq!(report.payout_details[0].kes_payout_amount, 1500);
        assert_eq!(report.total_payout_amount, 1500);
    }

    #[test]
    fn window_bounds_are_half_open_over_full_days() {
        let period = PayoutPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };
        let (start, end) = window_bounds(&period);
        assert_eq!(start.to_rfc3339(), "2026-03-01T00:00:00+00:00");
        // End bound is exclusive, so the 15th is fully covered.
        assert_eq!(end.to_rfc3339(), "2026-03-16T00:00:00+00:00");
    }
}
