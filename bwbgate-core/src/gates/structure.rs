//! Structure validator — defined-risk and asymmetry constraints.
//!
//! This stage never chooses strikes. It accepts a candidate proposed by the
//! external builder and checks it against four rules, the last of which
//! rebuilds the structure from the chain via the deterministic construction
//! rule and rejects any silently-overridden strikes.

use crate::builder::build_structure;
use crate::domain::{BwbStructure, OptionQuote};
use crate::record::{RuleCategory, RuleId, RuleResult};

/// Validate a candidate structure. Always returns four results,
/// `category = Structure`, in a fixed order; every rule is evaluated even
/// after one has failed.
pub fn validate_structure(candidate: &BwbStructure, chain: &[OptionQuote]) -> Vec<RuleResult> {
    let mut results = Vec::with_capacity(4);

    // 1. Shape is exactly a broken wing butterfly of the declared kind.
    let shape_ok = candidate.is_bwb_shape();
    results.push(result(
        RuleId::StructureKind,
        shape_ok,
        if shape_ok {
            format!("legs form a {:?}", candidate.kind)
        } else {
            format!(
                "legs do not form a {:?}: expected one short x2 between two long x1 wings",
                candidate.kind
            )
        },
    ));

    // 2. Maximum loss is finite and computable from the supplied legs.
    results.push(match candidate.max_loss() {
        Some(loss) if loss.is_finite() => result(
            RuleId::MaxLossDefined,
            true,
            format!("maximum loss is defined: {loss:.4}"),
        ),
        _ => result(
            RuleId::MaxLossDefined,
            false,
            "maximum loss is indeterminate: missing leg price or invalid shape",
        ),
    });

    // 3. Wing widths must be unequal by design.
    results.push(match candidate.wing_widths() {
        Some((lower, upper)) if lower != upper => result(
            RuleId::AsymmetricWings,
            true,
            format!("wing widths are asymmetric: lower {lower:.2}, upper {upper:.2}"),
        ),
        Some((lower, _)) => result(
            RuleId::AsymmetricWings,
            false,
            format!("wing widths are symmetric at {lower:.2}; a symmetric butterfly is not permitted"),
        ),
        None => result(
            RuleId::AsymmetricWings,
            false,
            "wing widths are undefined for this shape",
        ),
    });

    // 4. Strikes must match the deterministic construction rule.
    results.push(match build_structure(chain, candidate.kind) {
        Ok(reference) => {
            let matches = legs_match(candidate, &reference);
            result(
                RuleId::StrikeRuleMatch,
                matches,
                if matches {
                    "strikes match the deterministic construction rule".to_string()
                } else {
                    format!(
                        "strikes {:?} differ from the construction rule's {:?}",
                        candidate.sorted_strikes(),
                        reference.sorted_strikes()
                    )
                },
            )
        }
        Err(err) => result(
            RuleId::StrikeRuleMatch,
            false,
            format!("construction rule could not produce a reference structure: {err}"),
        ),
    });

    results
}

/// Leg-for-leg equivalence on the fields the selection rule fixes: action,
/// quantity, option type, and strike. Prices and greeks may drift between
/// the build snapshot and validation.
fn legs_match(candidate: &BwbStructure, reference: &BwbStructure) -> bool {
    if candidate.legs.len() != reference.legs.len() {
        return false;
    }
    let key = |s: &BwbStructure| {
        let mut legs: Vec<_> = s
            .legs
            .iter()
            .map(|l| (l.action, l.quantity, l.option_type, l.strike))
            .collect();
        legs.sort_by(|a, b| a.3.partial_cmp(&b.3).unwrap_or(std::cmp::Ordering::Equal));
        legs
    };
    key(candidate) == key(reference)
}

fn result(rule_id: RuleId, passed: bool, reason: impl Into<String>) -> RuleResult {
    if passed {
        RuleResult::pass(rule_id, RuleCategory::Structure, reason)
    } else {
        RuleResult::fail(rule_id, RuleCategory::Structure, reason)
    }
}
