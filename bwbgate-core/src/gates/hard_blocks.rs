//! Hard block evaluator — absolute disqualifying conditions.
//!
//! Exactly six rules, in a fixed order chosen for audit readability. Every
//! rule is evaluated independently: a failed holiday check never skips the
//! time-window check, because the record is an audit artifact, not a
//! fast-fail list. The sixth rule is the catch-all that converts any
//! internal evaluation failure into an explicit failing result.

use crate::domain::EvaluationContext;
use crate::engine::EngineConfig;
use crate::error::EvalError;
use crate::record::{RuleCategory, RuleId, RuleResult};

use super::holiday::week_gate;

type Check = Result<(bool, String), EvalError>;

/// Evaluate all six hard blocks against the context. Always returns six
/// results, `category = HardBlock`, in the fixed order.
pub fn evaluate_hard_blocks(
    context: &EvaluationContext,
    config: &EngineConfig,
) -> Vec<RuleResult> {
    // An ambiguous calendar fails both holiday rules and, through the Err
    // path, the catch-all.
    let (entry_check, expiration_check): (Check, Check) = match week_gate(
        context.as_of_date,
        context.expiration_date,
        &context.calendar,
    ) {
        Ok(gate) => (
            Ok((
                gate.entry_ok,
                if gate.entry_ok {
                    format!("entry day {} is a trading day", context.as_of_date)
                } else {
                    format!(
                        "entry day {} is not a confirmed trading day",
                        context.as_of_date
                    )
                },
            )),
            Ok((
                gate.expiration_ok,
                if gate.expiration_ok {
                    format!("expiration day {} is a trading day", context.expiration_date)
                } else {
                    format!(
                        "expiration day {} is not a confirmed trading day",
                        context.expiration_date
                    )
                },
            )),
        ),
        Err(err) => (Err(err.clone()), Err(err)),
    };

    let checks: [(RuleId, Check); 5] = [
        (RuleId::EntryDayHoliday, entry_check),
        (RuleId::ExpirationDayHoliday, expiration_check),
        (RuleId::EntryWindow, Ok(check_entry_window(context))),
        (RuleId::DataIntegrity, check_data_integrity(context, config)),
        (
            RuleId::InstrumentIdentity,
            Ok(check_instrument(context, config)),
        ),
    ];

    let mut results = Vec::with_capacity(6);
    let mut unevaluable: Vec<String> = Vec::new();

    for (rule_id, outcome) in checks {
        match outcome {
            Ok((passed, reason)) => {
                results.push(if passed {
                    RuleResult::pass(rule_id, RuleCategory::HardBlock, reason)
                } else {
                    RuleResult::fail(rule_id, RuleCategory::HardBlock, reason)
                });
            }
            Err(err) => {
                unevaluable.push(format!("{rule_id}: {err}"));
                results.push(RuleResult::fail(
                    rule_id,
                    RuleCategory::HardBlock,
                    format!("rule could not be evaluated: {err}"),
                ));
            }
        }
    }

    results.push(if unevaluable.is_empty() {
        RuleResult::pass(
            RuleId::RuleUnevaluable,
            RuleCategory::HardBlock,
            "all hard block rules evaluated conclusively",
        )
    } else {
        RuleResult::fail(
            RuleId::RuleUnevaluable,
            RuleCategory::HardBlock,
            unevaluable.join("; "),
        )
    });

    results
}

fn check_entry_window(context: &EvaluationContext) -> (bool, String) {
    let window = context.entry_window;
    let passed = window.contains(context.as_of_time);
    let reason = if passed {
        format!(
            "as-of time {} is within the entry window {}..={}",
            context.as_of_time, window.start, window.end
        )
    } else {
        format!(
            "as-of time {} is outside the entry window {}..={}",
            context.as_of_time, window.start, window.end
        )
    };
    (passed, reason)
}

fn check_data_integrity(context: &EvaluationContext, config: &EngineConfig) -> Check {
    let series = &context.price_series;
    let mut failures: Vec<String> = Vec::new();

    if series.is_empty() {
        failures.push("price series is empty".into());
    } else {
        if series.len() < config.long_period {
            failures.push(format!(
                "insufficient history: {} closes provided, minimum {} required",
                series.len(),
                config.long_period
            ));
        }
        for point in series {
            if !point.close.is_finite() {
                failures.push(format!("non-finite close at {}", point.date));
                break;
            }
        }
        if series.windows(2).any(|w| w[0].date >= w[1].date) {
            failures.push("price series is not strictly chronological".into());
        }

        let last = &series[series.len() - 1];
        if last.date > context.as_of_date {
            failures.push(format!(
                "price series extends past the as-of date ({} > {})",
                last.date, context.as_of_date
            ));
        } else {
            let age = (context.as_of_date - last.date).num_days();
            if age > config.max_close_age_days {
                failures.push(format!(
                    "last close {} is {} days old (max {})",
                    last.date, age, config.max_close_age_days
                ));
            }
        }
    }

    if failures.is_empty() {
        Ok((
            true,
            format!(
                "price series intact: {} closes through {}",
                series.len(),
                series[series.len() - 1].date
            ),
        ))
    } else {
        Ok((false, failures.join("; ")))
    }
}

fn check_instrument(context: &EvaluationContext, config: &EngineConfig) -> (bool, String) {
    // Exact, case-sensitive match against the single permitted symbol.
    let passed = context.underlying_symbol == config.permitted_symbol;
    let reason = if passed {
        format!("underlying '{}' is the permitted symbol", context.underlying_symbol)
    } else {
        format!(
            "underlying '{}' is not the permitted symbol '{}'",
            context.underlying_symbol, config.permitted_symbol
        )
    };
    (passed, reason)
}
