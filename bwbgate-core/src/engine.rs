//! Decision orchestrator — sequences the gates and seals the audit record.
//!
//! Single pass, no retries:
//!
//! ```text
//! START → hard blocks → [any failed? NO_TRADE, seal]
//!       → signals     → [any failed? NO_TRADE, seal]
//!       → structure (candidate present?) → [any failed? NO_TRADE]
//!       → TRADE_ALLOWED, seal
//! ```
//!
//! Within a stage every rule is evaluated and recorded; across stages the
//! orchestrator short-circuits, so the record contains signal results only
//! when all hard blocks passed, and structure results only when all signals
//! passed and a candidate was supplied. An absent candidate after the signal
//! gate is a terminal NO_TRADE, not an error. Internal stage failures are
//! recorded as a failing `rule_unevaluable` result for that stage; `evaluate`
//! never raises past its boundary.

use serde::{Deserialize, Serialize};

use crate::domain::EvaluationContext;
use crate::fingerprint::ContextFingerprint;
use crate::gates::{evaluate_hard_blocks, evaluate_signals, validate_structure};
use crate::record::{Decision, EvaluationRecord, RuleCategory, RuleId, RuleResult, Verdict};
use crate::trend::compute_ema_state;

/// Engine thresholds and identity constraints.
///
/// There is deliberately no override flag here or anywhere else in the
/// engine's surface: the no-discretion clause is enforced structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The single permitted underlying, compared case-sensitively.
    pub permitted_symbol: String,
    pub short_period: usize,
    pub long_period: usize,
    /// Maximum age of the last close relative to the as-of date.
    pub max_close_age_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            permitted_symbol: "SPX".into(),
            short_period: 3,
            long_period: 8,
            max_close_age_days: 5,
        }
    }
}

/// The decision engine. Stateless across runs; a single instance may be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one immutable snapshot and return a complete, sealed
    /// decision. Pure: identical contexts produce identical decisions.
    pub fn evaluate(&self, context: &EvaluationContext) -> Decision {
        let fingerprint = ContextFingerprint::of(context);
        let mut record = EvaluationRecord::new();

        // Stage 1: hard blocks. Always evaluated, always recorded in full.
        let hard_blocks = evaluate_hard_blocks(context, &self.config);
        let hard_blocks_clear = hard_blocks.iter().all(|r| r.passed);
        record.extend(hard_blocks);
        if !hard_blocks_clear {
            return seal(Verdict::NoTrade, record, None, fingerprint);
        }

        // Stage 2: signal conditions. A trend evaluation failure here is an
        // internal error (the data-integrity block should have caught it);
        // it becomes a failing catch-all result rather than a panic.
        let closes = context.closes();
        let signals = match compute_ema_state(
            &closes,
            self.config.short_period,
            self.config.long_period,
        ) {
            Ok(state) => evaluate_signals(&state, context.timeframe),
            Err(err) => vec![RuleResult::fail(
                RuleId::RuleUnevaluable,
                RuleCategory::Signal,
                format!("trend evaluation failed: {err}"),
            )],
        };
        let signals_clear = signals.iter().all(|r| r.passed);
        record.extend(signals);
        if !signals_clear {
            return seal(Verdict::NoTrade, record, None, fingerprint);
        }

        // Stage 3: structure. No candidate after the signal gate is a
        // terminal NO_TRADE awaiting the external builder; nothing more is
        // recorded in that case.
        let Some(candidate) = &context.candidate_structure else {
            return seal(Verdict::NoTrade, record, None, fingerprint);
        };
        let checks = validate_structure(candidate, &context.option_chain);
        let structure_clear = checks.iter().all(|r| r.passed);
        record.extend(checks);

        if structure_clear {
            seal(
                Verdict::TradeAllowed,
                record,
                Some(candidate.clone()),
                fingerprint,
            )
        } else {
            seal(Verdict::NoTrade, record, None, fingerprint)
        }
    }
}

fn seal(
    verdict: Verdict,
    mut record: EvaluationRecord,
    structure: Option<crate::domain::BwbStructure>,
    context_fingerprint: ContextFingerprint,
) -> Decision {
    record.seal();
    Decision {
        verdict,
        record,
        structure,
        context_fingerprint,
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(context: &EvaluationContext) -> Decision {
    Engine::default().evaluate(context)
}
