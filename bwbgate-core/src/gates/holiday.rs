//! Holiday gate — is the entry/expiration pair a tradeable week?

use chrono::NaiveDate;

use crate::domain::HolidayCalendar;
use crate::error::EvalError;

/// Tradeability of the two dates that bound a weekly structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekGate {
    pub entry_ok: bool,
    pub expiration_ok: bool,
}

/// Classify the entry day and the expiration day against the calendar.
///
/// Fails closed: if the calendar cannot conclusively classify *either* date
/// the whole gate is `EvalError::Ambiguous` naming the indeterminate
/// date(s). The hard block evaluator converts that error into failing
/// results for both holiday rules and the catch-all — ambiguity must block.
pub fn week_gate(
    entry_date: NaiveDate,
    expiration_date: NaiveDate,
    calendar: &HolidayCalendar,
) -> Result<WeekGate, EvalError> {
    match (
        calendar.classify(entry_date),
        calendar.classify(expiration_date),
    ) {
        (Some(entry_ok), Some(expiration_ok)) => Ok(WeekGate {
            entry_ok,
            expiration_ok,
        }),
        (entry, expiration) => {
            let mut indeterminate = Vec::new();
            if entry.is_none() {
                indeterminate.push(format!("entry day {entry_date}"));
            }
            if expiration.is_none() {
                indeterminate.push(format!("expiration day {expiration_date}"));
            }
            Err(EvalError::Ambiguous(format!(
                "calendar cannot classify {}",
                indeterminate.join(" and ")
            )))
        }
    }
}
