//! Signal gate — necessary-but-not-sufficient trend conditions.
//!
//! Consulted by the orchestrator only after every hard block passed; the
//! results here can never override a failed hard block.

use crate::domain::Timeframe;
use crate::record::{RuleCategory, RuleId, RuleResult};
use crate::trend::EmaState;

/// Evaluate the three signal conditions in order. `timeframe` comes from the
/// context, not the EMA state — an unset bar interval invalidates the signal
/// regardless of what the EMAs say.
pub fn evaluate_signals(state: &EmaState, timeframe: Option<Timeframe>) -> Vec<RuleResult> {
    let mut results = Vec::with_capacity(3);

    // 1. Short EMA strictly above long EMA.
    let short_above = state.short_value > state.long_value;
    results.push(result(
        RuleId::ShortAboveLong,
        short_above,
        format!(
            "{}-period EMA {:.4} {} {}-period EMA {:.4}",
            state.short_period,
            state.short_value,
            if short_above { "is above" } else { "is not above" },
            state.long_period,
            state.long_value
        ),
    ));

    // 2. Timeframe explicitly defined.
    results.push(match timeframe {
        Some(tf) => result(
            RuleId::TimeframeDefined,
            true,
            format!("bar interval is explicit: {tf:?}"),
        ),
        None => result(
            RuleId::TimeframeDefined,
            false,
            "bar interval of the price series is not defined",
        ),
    });

    // 3. Long EMA slope not negative; exactly zero passes.
    let slope_ok = state.long_slope >= 0.0;
    results.push(result(
        RuleId::LongSlopeNonNegative,
        slope_ok,
        format!(
            "{}-period EMA slope {:.6} is {}",
            state.long_period,
            state.long_slope,
            if slope_ok { "non-negative" } else { "negative" }
        ),
    ));

    results
}

fn result(rule_id: RuleId, passed: bool, reason: impl Into<String>) -> RuleResult {
    if passed {
        RuleResult::pass(rule_id, RuleCategory::Signal, reason)
    } else {
        RuleResult::fail(rule_id, RuleCategory::Signal, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(short: f64, long: f64, slope: f64) -> EmaState {
        EmaState {
            short_period: 3,
            long_period: 8,
            short_value: short,
            long_value: long,
            long_slope: slope,
        }
    }

    fn rule(results: &[RuleResult], id: RuleId) -> &RuleResult {
        results.iter().find(|r| r.rule_id == id).unwrap()
    }

    #[test]
    fn bullish_state_passes_all_three() {
        let results = evaluate_signals(&state(105.0, 104.0, 0.3), Some(Timeframe::Daily));
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert!(results.iter().all(|r| r.category == RuleCategory::Signal));
    }

    #[test]
    fn short_equal_to_long_fails_strict_comparison() {
        let results = evaluate_signals(&state(100.0, 100.0, 0.3), Some(Timeframe::Daily));
        assert!(!rule(&results, RuleId::ShortAboveLong).passed);
    }

    #[test]
    fn zero_slope_passes_boundary() {
        let results = evaluate_signals(&state(105.0, 104.0, 0.0), Some(Timeframe::Daily));
        assert!(rule(&results, RuleId::LongSlopeNonNegative).passed);
    }

    #[test]
    fn negative_slope_fails() {
        let results = evaluate_signals(&state(105.0, 104.0, -1e-9), Some(Timeframe::Daily));
        assert!(!rule(&results, RuleId::LongSlopeNonNegative).passed);
    }

    #[test]
    fn missing_timeframe_fails_rule_two_only() {
        let results = evaluate_signals(&state(105.0, 104.0, 0.3), None);
        assert!(!rule(&results, RuleId::TimeframeDefined).passed);
        assert!(rule(&results, RuleId::ShortAboveLong).passed);
        assert!(rule(&results, RuleId::LongSlopeNonNegative).passed);
    }

    #[test]
    fn all_rules_evaluated_even_when_first_fails() {
        let results = evaluate_signals(&state(100.0, 105.0, -0.5), None);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| !r.passed));
    }
}
