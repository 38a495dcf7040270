//! Deterministic BWB construction rule.
//!
//! Given a chain snapshot and a structure kind, there is exactly one
//! structure this rule produces — no discretionary strike selection. The
//! engine never calls this to *choose* a trade; the structure validator uses
//! it as the reference a supplied candidate must match, and callers may use
//! it to propose a candidate in the first place.
//!
//! Rules:
//! - Put credit BWB: short x2 at the put with |delta| closest to 0.55,
//!   long one strike above, wing two strikes below.
//! - Call debit BWB: short x2 at the call with |delta| closest to 0.45,
//!   wing two strikes above, long one strike below.
//! - Leg prices are bid/ask mids. Quotes without a delta are never selected
//!   as the short strike.

use crate::domain::{BwbStructure, LegAction, OptionQuote, StructureKind, StructureLeg};
use crate::error::EvalError;

pub const TARGET_DELTA_PUT_SHORT: f64 = 0.55;
pub const TARGET_DELTA_CALL_SHORT: f64 = 0.45;

/// Build the reference structure for `kind` from a chain snapshot.
pub fn build_structure(
    chain: &[OptionQuote],
    kind: StructureKind,
) -> Result<BwbStructure, EvalError> {
    let leg_type = kind.option_type();
    let mut quotes: Vec<&OptionQuote> = chain
        .iter()
        .filter(|q| q.option_type == leg_type && q.strike.is_finite())
        .collect();

    if quotes.is_empty() {
        return Err(EvalError::InvalidStructure(format!(
            "no {:?} options in chain",
            leg_type
        )));
    }

    quotes.sort_by(|a, b| {
        a.strike
            .partial_cmp(&b.strike)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let target_delta = match kind {
        StructureKind::PutCreditBwb => TARGET_DELTA_PUT_SHORT,
        StructureKind::CallDebitBwb => TARGET_DELTA_CALL_SHORT,
    };

    let short_idx = closest_delta_index(&quotes, target_delta).ok_or_else(|| {
        EvalError::InvalidStructure(format!(
            "no option with a delta near {target_delta:.2} in chain"
        ))
    })?;
    let short = quotes[short_idx];

    // Index offsets from the short strike; the wing sits on the wide side.
    let (upper_offset, lower_offset) = match kind {
        StructureKind::PutCreditBwb => (1_usize, 2_usize),
        StructureKind::CallDebitBwb => (2, 1),
    };

    let upper_idx = short_idx + upper_offset;
    if upper_idx >= quotes.len() {
        return Err(EvalError::InvalidStructure(format!(
            "not enough strikes above short strike {}",
            short.strike
        )));
    }
    if short_idx < lower_offset {
        return Err(EvalError::InvalidStructure(format!(
            "not enough strikes below short strike {}",
            short.strike
        )));
    }
    let upper = quotes[upper_idx];
    let lower = quotes[short_idx - lower_offset];

    Ok(BwbStructure {
        kind,
        legs: vec![
            make_leg(LegAction::Sell, 2, short),
            make_leg(LegAction::Buy, 1, upper),
            make_leg(LegAction::Buy, 1, lower),
        ],
    })
}

fn closest_delta_index(quotes: &[&OptionQuote], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, quote) in quotes.iter().enumerate() {
        let Some(delta) = quote.delta else { continue };
        let distance = (delta.abs() - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

fn make_leg(action: LegAction, quantity: u32, quote: &OptionQuote) -> StructureLeg {
    StructureLeg {
        action,
        quantity,
        option_type: quote.option_type,
        strike: quote.strike,
        price: Some(quote.mid()),
        delta: quote.delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptionType;

    fn quote(option_type: OptionType, strike: f64, delta: f64, bid: f64, ask: f64) -> OptionQuote {
        OptionQuote {
            option_type,
            strike,
            delta: Some(delta),
            bid,
            ask,
        }
    }

    fn sample_put_chain() -> Vec<OptionQuote> {
        vec![
            quote(OptionType::Put, 5800.0, -0.70, 45.0, 46.0),
            quote(OptionType::Put, 5825.0, -0.65, 38.0, 39.0),
            quote(OptionType::Put, 5850.0, -0.60, 32.0, 33.0),
            quote(OptionType::Put, 5875.0, -0.55, 26.0, 27.0),
            quote(OptionType::Put, 5900.0, -0.50, 21.0, 22.0),
            quote(OptionType::Put, 5925.0, -0.45, 17.0, 18.0),
            quote(OptionType::Put, 5950.0, -0.40, 13.0, 14.0),
        ]
    }

    fn sample_call_chain() -> Vec<OptionQuote> {
        vec![
            quote(OptionType::Call, 5850.0, 0.60, 55.0, 56.0),
            quote(OptionType::Call, 5875.0, 0.55, 45.0, 46.0),
            quote(OptionType::Call, 5900.0, 0.50, 36.0, 37.0),
            quote(OptionType::Call, 5925.0, 0.45, 28.0, 29.0),
            quote(OptionType::Call, 5950.0, 0.40, 21.0, 22.0),
            quote(OptionType::Call, 5975.0, 0.35, 15.0, 16.0),
            quote(OptionType::Call, 6000.0, 0.30, 10.0, 11.0),
        ]
    }

    #[test]
    fn put_credit_bwb_strikes_and_prices() {
        let s = build_structure(&sample_put_chain(), StructureKind::PutCreditBwb).unwrap();
        assert!(s.is_bwb_shape());

        // Short at the -0.55 delta put, long one strike up, wing two down.
        assert_eq!(s.legs[0].strike, 5875.0);
        assert_eq!(s.legs[0].quantity, 2);
        assert_eq!(s.legs[1].strike, 5900.0);
        assert_eq!(s.legs[2].strike, 5825.0);

        assert_eq!(s.legs[0].price, Some(26.5));
        assert_eq!(s.net_premium(), Some(2.0 * 26.5 - 21.5 - 38.5));
        assert_eq!(s.max_loss(), Some(32.0));

        let (lower, upper) = s.wing_widths().unwrap();
        assert!(lower > upper, "wing must sit on the lower side");
    }

    #[test]
    fn call_debit_bwb_strikes() {
        let s = build_structure(&sample_call_chain(), StructureKind::CallDebitBwb).unwrap();
        assert!(s.is_bwb_shape());

        // Short at the 0.45 delta call, wing two strikes up, long one down.
        assert_eq!(s.legs[0].strike, 5925.0);
        assert_eq!(s.legs[1].strike, 5975.0);
        assert_eq!(s.legs[2].strike, 5900.0);

        let (lower, upper) = s.wing_widths().unwrap();
        assert!(upper > lower, "wing must sit on the upper side");
    }

    #[test]
    fn builder_is_deterministic() {
        let a = build_structure(&sample_put_chain(), StructureKind::PutCreditBwb).unwrap();
        let b = build_structure(&sample_put_chain(), StructureKind::PutCreditBwb).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_chain_is_rejected() {
        let err = build_structure(&[], StructureKind::PutCreditBwb).unwrap_err();
        assert!(matches!(err, EvalError::InvalidStructure(_)));
    }

    #[test]
    fn wrong_option_type_only_is_rejected() {
        let err = build_structure(&sample_call_chain(), StructureKind::PutCreditBwb).unwrap_err();
        assert!(err.to_string().contains("no Put options"));
    }

    #[test]
    fn sparse_chain_is_rejected() {
        // Only two strikes: no room for the lower wing.
        let chain = vec![
            quote(OptionType::Put, 5875.0, -0.55, 26.0, 27.0),
            quote(OptionType::Put, 5900.0, -0.50, 21.0, 22.0),
        ];
        let err = build_structure(&chain, StructureKind::PutCreditBwb).unwrap_err();
        assert!(err.to_string().contains("below short strike"));
    }

    #[test]
    fn quotes_without_delta_are_skipped_for_short_selection() {
        let mut chain = sample_put_chain();
        chain[3].delta = None; // the -0.55 put loses its delta
        let s = build_structure(&chain, StructureKind::PutCreditBwb).unwrap();
        // Next-closest |delta| to 0.55 is the -0.60 or -0.50 put; -0.60 and
        // -0.50 tie at distance 0.05, and the lower strike sorts first.
        assert_eq!(s.legs[0].strike, 5850.0);
    }

    #[test]
    fn chain_order_does_not_matter() {
        let mut shuffled = sample_put_chain();
        shuffled.reverse();
        let a = build_structure(&sample_put_chain(), StructureKind::PutCreditBwb).unwrap();
        let b = build_structure(&shuffled, StructureKind::PutCreditBwb).unwrap();
        assert_eq!(a, b);
    }
}
