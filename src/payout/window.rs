//! Payout run windows.
//!
//! Payout runs are triggered twice a month by an external scheduler: a
//! mid-month run ("M") covering the 1st through the 15th, and an end-of-month
//! run ("R") covering the 16th through the last day of the month.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::report::PayoutPeriod;

/// Which half of the month a payout run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutDay {
    MidMonth,
    EndMonth,
}

impl PayoutDay {
    /// Parse the scheduler's day code. Anything other than "M" or "R" is
    /// rejected before the datastore is touched.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(PayoutDay::MidMonth),
            "R" => Some(PayoutDay::EndMonth),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            PayoutDay::MidMonth => "M",
            PayoutDay::EndMonth => "R",
        }
    }
}

/// Aggregation window for a run triggered on `today`.
pub fn window_for(day: PayoutDay, today: NaiveDate) -> PayoutPeriod {
    let first = today.with_day(1).unwrap_or(today);
    match day {
        PayoutDay::MidMonth => PayoutPeriod {
            start_date: first,
            end_date: first + Days::new(14),
        },
        PayoutDay::EndMonth => PayoutPeriod {
            start_date: first + Days::new(15),
            end_date: last_day_of_month(first),
        },
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    (first + Months::new(1)) - Days::new(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_month_covers_first_half() {
        let period = window_for(PayoutDay::MidMonth, date(2026, 3, 14));
        assert_eq!(period.start_date, date(2026, 3, 1));
        assert_eq!(period.end_date, date(2026, 3, 15));
    }

    #[test]
    fn end_of_month_covers_second_half() {
        let period = window_for(PayoutDay::EndMonth, date(2026, 3, 30));
        assert_eq!(period.start_date, date(2026, 3, 16));
        assert_eq!(period.end_date, date(2026, 3, 31));
    }

    #[test]
    fn end_of_month_handles_february() {
        let period = window_for(PayoutDay::EndMonth, date(2026, 2, 20));
        assert_eq!(period.end_date, date(2026, 2, 28));

        let leap = window_for(PayoutDay::EndMonth, date(2028, 2, 20));
        assert_eq!(leap.end_date, date(2028, 2, 29));
    }

    #[test]
    fn day_codes_parse() {
        assert_eq!(PayoutDay::from_code("M"), Some(PayoutDay::MidMonth));
        assert_eq!(PayoutDay::from_code("R"), Some(PayoutDay::EndMonth));
        assert_eq!(PayoutDay::from_code("X"), None);
        assert_eq!(PayoutDay::from_code("m"), None);
    }
}
