//! BWBGate Core — weekly entry decision engine for a broken wing butterfly program.
//!
//! This crate contains the heart of the decision engine:
//! - Domain types (evaluation context, price points, holiday calendar, option chain, BWB structure)
//! - Audit record types (rule results, evaluation record, decision)
//! - Trend signal evaluator (short/long EMA state)
//! - Rule gates (hard blocks, signal conditions, structure validation)
//! - Deterministic BWB builder (the reference construction rule)
//! - Decision orchestrator (`engine::Engine`)
//!
//! The engine is a pure, synchronous function of an immutable input snapshot.
//! It never performs I/O, never places orders, and never raises past its
//! boundary: every recognized failure becomes a failing `RuleResult` and the
//! caller always receives a complete, sealed `Decision`.

pub mod builder;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod gates;
pub mod record;
pub mod trend;

pub use engine::{evaluate, Engine, EngineConfig};
pub use record::{Decision, EvaluationRecord, RuleCategory, RuleId, RuleResult, Verdict};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all engine types are Send + Sync.
    ///
    /// Callers are allowed to run independent evaluations in parallel; nothing
    /// in the snapshot or the decision may hold thread-bound state.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::EvaluationContext>();
        require_sync::<domain::EvaluationContext>();
        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::HolidayCalendar>();
        require_sync::<domain::HolidayCalendar>();
        require_send::<domain::OptionQuote>();
        require_sync::<domain::OptionQuote>();
        require_send::<domain::BwbStructure>();
        require_sync::<domain::BwbStructure>();

        // Audit types
        require_send::<record::RuleResult>();
        require_sync::<record::RuleResult>();
        require_send::<record::EvaluationRecord>();
        require_sync::<record::EvaluationRecord>();
        require_send::<record::Decision>();
        require_sync::<record::Decision>();
        require_send::<fingerprint::ContextFingerprint>();
        require_sync::<fingerprint::ContextFingerprint>();

        // Engine types
        require_send::<engine::Engine>();
        require_sync::<engine::Engine>();
        require_send::<engine::EngineConfig>();
        require_sync::<engine::EngineConfig>();
        require_send::<trend::EmaState>();
        require_sync::<trend::EmaState>();
    }

    /// Architecture contract: `evaluate` takes a shared reference and returns
    /// an owned `Decision` — the context cannot be mutated mid-evaluation and
    /// there is no override parameter anywhere in the signature.
    #[test]
    fn evaluate_signature_has_no_override_path() {
        fn _check(engine: &Engine, ctx: &domain::EvaluationContext) -> Decision {
            engine.evaluate(ctx)
        }
    }
}
