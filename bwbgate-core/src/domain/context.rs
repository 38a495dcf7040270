//! Evaluation context — the immutable snapshot one run observes.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::calendar::HolidayCalendar;
use super::chain::OptionQuote;
use super::structure::BwbStructure;
use super::Symbol;

/// One timestamped close in a chronological price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Bar interval the price series represents. The evaluator never infers
/// this; an unset timeframe fails the signal gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Weekly,
}

/// Entry time window, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl EntryWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Immutable snapshot consumed by one evaluation run.
///
/// Constructed by the caller from pre-resolved data; the engine takes a
/// shared reference and never mutates it, so a single run observes one
/// consistent picture of the world. Nothing here is shared across
/// concurrent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub as_of_date: NaiveDate,
    pub as_of_time: NaiveTime,
    pub underlying_symbol: Symbol,
    pub expiration_date: NaiveDate,
    /// Explicit bar interval of `price_series`; `None` fails the signal gate.
    pub timeframe: Option<Timeframe>,
    /// Timestamped closes, oldest first.
    pub price_series: Vec<PricePoint>,
    pub calendar: HolidayCalendar,
    pub entry_window: EntryWindow,
    /// Chain rows for the target expiration; empty when no chain snapshot
    /// was resolved. Needed by the structure stage's construction-rule check.
    pub option_chain: Vec<OptionQuote>,
    /// Candidate structure proposed by the external builder, if any.
    pub candidate_structure: Option<BwbStructure>,
}

impl EvaluationContext {
    /// Close values in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.price_series.iter().map(|p| p.close).collect()
    }
}
