//! Serializable run configuration.
//!
//! A run file is TOML with three tables:
//! - `[run]` — evaluation snapshot parameters (symbol, dates, window)
//! - `[inputs]` — paths to the close-price and option-chain CSV files
//! - `[calendar]` — holiday list and the date range it is authoritative for

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use bwbgate_core::builder::build_structure;
use bwbgate_core::domain::{
    EntryWindow, EvaluationContext, HolidayCalendar, OptionQuote, PricePoint, StructureKind,
    Timeframe,
};
use bwbgate_core::EngineConfig;

/// Top-level run file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub run: RunSection,
    pub inputs: InputsSection,
    pub calendar: CalendarSection,
}

/// Evaluation snapshot parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSection {
    /// Underlying the account is permitted to trade.
    pub symbol: String,

    pub as_of_date: NaiveDate,

    /// Wall-clock evaluation time (HH:MM:SS).
    pub as_of_time: NaiveTime,

    pub expiration_date: NaiveDate,

    /// Bar interval of the close series: "daily" or "weekly".
    pub timeframe: Option<Timeframe>,

    /// When set, a candidate of this kind is built from the chain and
    /// validated. When absent the evaluation stops after the signal gate.
    pub structure_kind: Option<StructureKind>,

    #[serde(default = "default_short_period")]
    pub short_period: usize,

    #[serde(default = "default_long_period")]
    pub long_period: usize,

    /// Maximum staleness of the most recent close, in calendar days.
    #[serde(default = "default_max_close_age_days")]
    pub max_close_age_days: i64,

    pub entry_window: WindowSection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowSection {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Paths to the input CSV files, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputsSection {
    /// Close-price CSV with `date,close` columns.
    pub prices: PathBuf,

    /// Option-chain CSV with `type,strike,delta,bid,ask` columns.
    pub chain: Option<PathBuf>,
}

/// Holiday calendar table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSection {
    pub coverage_start: NaiveDate,
    pub coverage_end: NaiveDate,
    pub holidays: Vec<NaiveDate>,

    /// Set false to declare the calendar stale; the holiday gate then
    /// fails closed for every date.
    #[serde(default = "default_true")]
    pub authoritative: bool,
}

fn default_short_period() -> usize {
    EngineConfig::default().short_period
}

fn default_long_period() -> usize {
    EngineConfig::default().long_period
}

fn default_max_close_age_days() -> i64 {
    EngineConfig::default().max_close_age_days
}

fn default_true() -> bool {
    true
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: RunConfig = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            permitted_symbol: self.run.symbol.clone(),
            short_period: self.run.short_period,
            long_period: self.run.long_period,
            max_close_age_days: self.run.max_close_age_days,
        }
    }

    pub fn holiday_calendar(&self) -> HolidayCalendar {
        let mut calendar = HolidayCalendar::new(
            self.calendar.holidays.iter().copied().collect(),
            self.calendar.coverage_start,
            self.calendar.coverage_end,
        );
        calendar.authoritative = self.calendar.authoritative;
        calendar
    }

    /// Loads the CSV inputs and assembles the evaluation snapshot.
    pub fn build_context(&self) -> Result<EvaluationContext> {
        let price_series = load_prices(&self.inputs.prices)?;
        let option_chain = match &self.inputs.chain {
            Some(path) => load_chain(path)?,
            None => Vec::new(),
        };
        let candidate_structure = match self.run.structure_kind {
            Some(kind) => Some(
                build_structure(&option_chain, kind)
                    .with_context(|| format!("building {kind:?} candidate from chain"))?,
            ),
            None => None,
        };
        Ok(EvaluationContext {
            as_of_date: self.run.as_of_date,
            as_of_time: self.run.as_of_time,
            underlying_symbol: self.run.symbol.clone(),
            expiration_date: self.run.expiration_date,
            timeframe: self.run.timeframe,
            price_series,
            calendar: self.holiday_calendar(),
            entry_window: EntryWindow {
                start: self.run.entry_window.start,
                end: self.run.entry_window.end,
            },
            option_chain,
            candidate_structure,
        })
    }
}

/// Reads a `date,close` CSV into a price series.
pub fn load_prices(path: &Path) -> Result<Vec<PricePoint>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening price CSV {}", path.display()))?;
    let mut series = Vec::new();
    for row in reader.deserialize() {
        let point: PricePoint =
            row.with_context(|| format!("parsing price CSV {}", path.display()))?;
        series.push(point);
    }
    Ok(series)
}

/// Reads a `type,strike,delta,bid,ask` CSV into an option chain.
pub fn load_chain(path: &Path) -> Result<Vec<OptionQuote>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening chain CSV {}", path.display()))?;
    let mut chain = Vec::new();
    for row in reader.deserialize() {
        let quote: OptionQuote =
            row.with_context(|| format!("parsing chain CSV {}", path.display()))?;
        chain.push(quote);
    }
    Ok(chain)
}
