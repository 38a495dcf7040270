//! Trend signal evaluator — short/long EMA state over a close series.
//!
//! Recursive: EMA[0] = close[0]; EMA[i] = close[i] * k + EMA[i-1] * (1 - k)
//! where k = 2 / (period + 1). No SMA seed — the first close seeds the
//! series, so every input of length >= period produces a defined state.
//!
//! This module only reports indicator state; rule evaluation lives in
//! `gates::signals`. Same closes in, same state out — nothing is retained
//! between calls.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Derived EMA state for one run. Recomputed deterministically from the
/// price series every time; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaState {
    pub short_period: usize,
    pub long_period: usize,
    pub short_value: f64,
    pub long_value: f64,
    /// `long_ema[last] - long_ema[last-1]`; exactly zero counts as
    /// non-negative downstream.
    pub long_slope: f64,
}

/// Compute the full EMA series for `values`.
///
/// Returns an empty vec for an empty input. Never NaN-guards: callers are
/// expected to have validated the series first.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(n);
    result.push(values[0]);

    let mut prev = values[0];
    for &value in &values[1..] {
        let ema = value * k + prev * (1.0 - k);
        result.push(ema);
        prev = ema;
    }

    result
}

/// Compute the EMA state used by the signal gate.
///
/// Requires `closes.len() >= long_period` (and at least two points for the
/// slope); anything less is a data-integrity failure, surfaced by the hard
/// block stage rather than silently defaulted here.
pub fn compute_ema_state(
    closes: &[f64],
    short_period: usize,
    long_period: usize,
) -> Result<EmaState, EvalError> {
    if short_period < 1 {
        return Err(EvalError::DataIntegrity(
            "short EMA period must be >= 1".into(),
        ));
    }
    if short_period >= long_period {
        return Err(EvalError::DataIntegrity(format!(
            "short period ({short_period}) must be less than long period ({long_period})"
        )));
    }

    let min_required = long_period.max(2);
    if closes.len() < min_required {
        return Err(EvalError::DataIntegrity(format!(
            "insufficient history: {} closes provided, minimum {} required for period {}",
            closes.len(),
            min_required,
            long_period
        )));
    }
    if closes.iter().any(|c| !c.is_finite()) {
        return Err(EvalError::DataIntegrity(
            "price series contains a non-finite close".into(),
        ));
    }

    let short = ema_series(closes, short_period);
    let long = ema_series(closes, long_period);

    let long_value = long[long.len() - 1];
    let long_prev = long[long.len() - 2];

    Ok(EmaState {
        short_period,
        long_period,
        short_value: short[short.len() - 1],
        long_value,
        long_slope: long_value - long_prev,
    })
}
