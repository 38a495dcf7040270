//! Context fingerprinting — deterministic identification of input snapshots.
//!
//! Every decision carries the BLAKE3 hash of the canonical JSON serialization
//! of its `EvaluationContext`, so a journal consumer can tie an audit record
//! back to the exact inputs that produced it and detect replayed runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::EvaluationContext;

/// Hex-encoded BLAKE3 hash of a canonicalized evaluation context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextFingerprint(pub String);

impl ContextFingerprint {
    /// Fingerprint an evaluation context.
    ///
    /// Struct fields serialize in declaration order and all collections in
    /// the context are ordered, so the JSON form is canonical: identical
    /// contexts always hash identically.
    pub fn of(context: &EvaluationContext) -> Self {
        let json =
            serde_json::to_string(context).expect("EvaluationContext must serialize");
        let hash = blake3::hash(json.as_bytes());
        Self(hash.to_hex().to_string())
    }
}

impl fmt::Display for ContextFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryWindow, HolidayCalendar, PricePoint, Timeframe};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::BTreeSet;

    fn sample_context() -> EvaluationContext {
        EvaluationContext {
            as_of_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            as_of_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            underlying_symbol: "SPX".into(),
            expiration_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            timeframe: Some(Timeframe::Daily),
            price_series: vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                close: 5900.0,
            }],
            calendar: HolidayCalendar::new(
                BTreeSet::new(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            ),
            entry_window: EntryWindow {
                start: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            },
            option_chain: vec![],
            candidate_structure: None,
        }
    }

    #[test]
    fn identical_contexts_hash_identically() {
        let a = ContextFingerprint::of(&sample_context());
        let b = ContextFingerprint::of(&sample_context());
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_hash_differently() {
        let base = ContextFingerprint::of(&sample_context());

        let mut changed = sample_context();
        changed.underlying_symbol = "SPY".into();
        assert_ne!(base, ContextFingerprint::of(&changed));

        let mut changed = sample_context();
        changed.price_series[0].close = 5901.0;
        assert_ne!(base, ContextFingerprint::of(&changed));
    }

    #[test]
    fn fingerprint_is_hex() {
        let fp = ContextFingerprint::of(&sample_context());
        assert_eq!(fp.0.len(), 64);
        assert!(fp.0.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
