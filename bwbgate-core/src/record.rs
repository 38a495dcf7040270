//! Audit record types: rule results, the evaluation record, and the decision.
//!
//! The record is an audit artifact, not a fast-fail list: within a stage
//! every rule is evaluated and recorded even after one has already failed.
//! The record serializes as a plain ordered list of rule results so the
//! journaling collaborators can persist it without knowing engine internals.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::BwbStructure;
use crate::fingerprint::ContextFingerprint;

/// Which stage a rule belongs to. Hard blocks dominate unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    HardBlock,
    Signal,
    Structure,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::HardBlock => "hard_block",
            RuleCategory::Signal => "signal",
            RuleCategory::Structure => "structure",
        }
    }
}

/// Stable identifiers for every rule the engine can record.
///
/// `RuleUnevaluable` doubles as the per-stage catch-all: an internal error in
/// any stage is recorded under this id with that stage's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    // Hard blocks (fixed audit order)
    EntryDayHoliday,
    ExpirationDayHoliday,
    EntryWindow,
    DataIntegrity,
    InstrumentIdentity,
    RuleUnevaluable,
    // Signal conditions
    ShortAboveLong,
    TimeframeDefined,
    LongSlopeNonNegative,
    // Structure checks
    StructureKind,
    MaxLossDefined,
    AsymmetricWings,
    StrikeRuleMatch,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::EntryDayHoliday => "entry_day_holiday",
            RuleId::ExpirationDayHoliday => "expiration_day_holiday",
            RuleId::EntryWindow => "entry_window",
            RuleId::DataIntegrity => "data_integrity",
            RuleId::InstrumentIdentity => "instrument_identity",
            RuleId::RuleUnevaluable => "rule_unevaluable",
            RuleId::ShortAboveLong => "short_above_long",
            RuleId::TimeframeDefined => "timeframe_defined",
            RuleId::LongSlopeNonNegative => "long_slope_non_negative",
            RuleId::StructureKind => "structure_kind",
            RuleId::MaxLossDefined => "max_loss_defined",
            RuleId::AsymmetricWings => "asymmetric_wings",
            RuleId::StrikeRuleMatch => "strike_rule_match",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule's outcome. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: RuleId,
    pub category: RuleCategory,
    pub passed: bool,
    pub reason: String,
}

impl RuleResult {
    pub fn pass(rule_id: RuleId, category: RuleCategory, reason: impl Into<String>) -> Self {
        Self {
            rule_id,
            category,
            passed: true,
            reason: reason.into(),
        }
    }

    pub fn fail(rule_id: RuleId, category: RuleCategory, reason: impl Into<String>) -> Self {
        Self {
            rule_id,
            category,
            passed: false,
            reason: reason.into(),
        }
    }
}

/// Ordered audit trail of every rule evaluated in one run.
///
/// Created fresh per run, appended to in evaluation order, sealed when the
/// orchestrator emits the final decision. Pushes after sealing are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluationRecord {
    results: Vec<RuleResult>,
    sealed: bool,
}

impl EvaluationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result. Returns false (and drops the result) once sealed.
    pub fn push(&mut self, result: RuleResult) -> bool {
        if self.sealed {
            return false;
        }
        self.results.push(result);
        true
    }

    /// Append a whole stage's results in order.
    pub fn extend(&mut self, results: Vec<RuleResult>) -> bool {
        if self.sealed {
            return false;
        }
        self.results.extend(results);
        true
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    pub fn count_in_category(&self, category: RuleCategory) -> usize {
        self.results
            .iter()
            .filter(|r| r.category == category)
            .count()
    }
}

// Serializes as the plain ordered list of results; a deserialized record is
// always sealed, since it came from a finished run.
impl Serialize for EvaluationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.results.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EvaluationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let results = Vec::<RuleResult>::deserialize(deserializer)?;
        Ok(Self {
            results,
            sealed: true,
        })
    }
}

/// Binary verdict. There is no partial allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    TradeAllowed,
    NoTrade,
}

/// The engine's complete output for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub record: EvaluationRecord,
    /// The validated candidate, present only on `TRADE_ALLOWED`.
    pub structure: Option<BwbStructure>,
    /// Hash of the exact input snapshot this decision was derived from.
    pub context_fingerprint: ContextFingerprint,
}
