//! Option chain snapshot rows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Put,
    Call,
}

/// One quoted option for a single expiration.
///
/// Delta is optional: some chains omit greeks for deep wings. Quotes without
/// a delta are still usable as structure legs but are skipped by the
/// short-strike selection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: f64,
    pub delta: Option<f64>,
    pub bid: f64,
    pub ask: f64,
}

impl OptionQuote {
    /// Bid/ask mid — the leg price convention used throughout.
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}
