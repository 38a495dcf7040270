//! Pre-resolved holiday calendar.
//!
//! The calendar is data handed in by the caller — the engine performs no
//! lookups against a live source. A date is only ever classified when the
//! calendar can do so conclusively; everything else is reported as
//! indeterminate and the holiday gate fails closed on it.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of non-tradeable dates with an explicit authority and coverage range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// Market holidays (weekdays on which the exchange is closed).
    pub holidays: BTreeSet<NaiveDate>,
    /// First date (inclusive) the calendar is authoritative for.
    pub coverage_start: NaiveDate,
    /// Last date (inclusive) the calendar is authoritative for.
    pub coverage_end: NaiveDate,
    /// False when the source flagged this calendar as stale or unverified.
    pub authoritative: bool,
}

impl HolidayCalendar {
    pub fn new(
        holidays: BTreeSet<NaiveDate>,
        coverage_start: NaiveDate,
        coverage_end: NaiveDate,
    ) -> Self {
        Self {
            holidays,
            coverage_start,
            coverage_end,
            authoritative: true,
        }
    }

    /// Conclusively classify a date as tradeable (`Some(true)`) or not
    /// (`Some(false)`). Returns `None` when the calendar cannot answer:
    /// stale/unverified source, or date outside the coverage range.
    pub fn classify(&self, date: NaiveDate) -> Option<bool> {
        if !self.authoritative {
            return None;
        }
        if date < self.coverage_start || date > self.coverage_end {
            return None;
        }
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Some(false);
        }
        Some(!self.holidays.contains(&date))
    }
}
