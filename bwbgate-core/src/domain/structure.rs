//! Broken wing butterfly structure types.
//!
//! A BWB is three legs on one option type: two short contracts at a middle
//! strike and one long contract on each side, with deliberately unequal wing
//! widths. These types only describe a structure; construction lives in
//! `builder` and acceptance in `gates::structure`.

use serde::{Deserialize, Serialize};

use super::chain::OptionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegAction {
    Buy,
    Sell,
}

/// Permitted structure kinds. Anything else (symmetric butterfly, vertical
/// spread) is rejected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    PutCreditBwb,
    CallDebitBwb,
}

impl StructureKind {
    /// The option type every leg of this kind must carry.
    pub fn option_type(&self) -> OptionType {
        match self {
            StructureKind::PutCreditBwb => OptionType::Put,
            StructureKind::CallDebitBwb => OptionType::Call,
        }
    }
}

/// One leg of a candidate structure. Price is the bid/ask mid at build time;
/// a missing price makes max loss indeterminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureLeg {
    pub action: LegAction,
    pub quantity: u32,
    pub option_type: OptionType,
    pub strike: f64,
    pub price: Option<f64>,
    pub delta: Option<f64>,
}

/// A candidate broken wing butterfly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BwbStructure {
    pub kind: StructureKind,
    pub legs: Vec<StructureLeg>,
}

impl BwbStructure {
    /// Whether the legs form a BWB shape for this kind: exactly three legs of
    /// the matching option type, one short x2 at the middle strike, one long
    /// x1 on each side, three distinct strikes.
    pub fn is_bwb_shape(&self) -> bool {
        if self.legs.len() != 3 {
            return false;
        }
        let leg_type = self.kind.option_type();
        if self.legs.iter().any(|l| l.option_type != leg_type) {
            return false;
        }
        if self.legs.iter().any(|l| !l.strike.is_finite()) {
            return false;
        }

        let shorts: Vec<&StructureLeg> = self
            .legs
            .iter()
            .filter(|l| l.action == LegAction::Sell)
            .collect();
        let longs: Vec<&StructureLeg> = self
            .legs
            .iter()
            .filter(|l| l.action == LegAction::Buy)
            .collect();
        if shorts.len() != 1 || longs.len() != 2 {
            return false;
        }
        if shorts[0].quantity != 2 || longs.iter().any(|l| l.quantity != 1) {
            return false;
        }

        let short_strike = shorts[0].strike;
        let lo = longs[0].strike.min(longs[1].strike);
        let hi = longs[0].strike.max(longs[1].strike);
        lo < short_strike && short_strike < hi
    }

    /// The single short (x2) leg, when the shape is valid.
    pub fn short_leg(&self) -> Option<&StructureLeg> {
        if !self.is_bwb_shape() {
            return None;
        }
        self.legs.iter().find(|l| l.action == LegAction::Sell)
    }

    /// Strikes in ascending order.
    pub fn sorted_strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.legs.iter().map(|l| l.strike).collect();
        strikes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        strikes
    }

    /// `(lower_width, upper_width)` — distances from the short strike to the
    /// lower and upper long strikes. `None` when the shape is not a BWB.
    pub fn wing_widths(&self) -> Option<(f64, f64)> {
        let short = self.short_leg()?.strike;
        let strikes = self.sorted_strikes();
        Some((short - strikes[0], strikes[2] - short))
    }

    /// Net premium: credit positive, debit negative. `None` when any leg
    /// price is missing.
    pub fn net_premium(&self) -> Option<f64> {
        let mut premium = 0.0;
        for leg in &self.legs {
            let price = leg.price?;
            let signed = match leg.action {
                LegAction::Sell => price,
                LegAction::Buy => -price,
            };
            premium += signed * leg.quantity as f64;
        }
        Some(premium)
    }

    /// Maximum loss from the defined strikes and leg prices, floored at zero.
    ///
    /// For a put credit BWB the worst case sits on the narrow upper spread;
    /// for a call debit BWB on the narrow lower spread. `None` when the shape
    /// is invalid or any leg price is missing.
    pub fn max_loss(&self) -> Option<f64> {
        let (lower_width, upper_width) = self.wing_widths()?;
        let premium = self.net_premium()?;
        let loss = match self.kind {
            StructureKind::PutCreditBwb => upper_width - premium,
            StructureKind::CallDebitBwb => lower_width - premium,
        };
        Some(loss.max(0.0))
    }
}
