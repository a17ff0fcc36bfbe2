//! Type-effectiveness calculations over a [`TypeChart`].
//!
//! Everything here is a pure function of the chart and its arguments. The fitness
//! components and the greedy team construction call into it heavily.
//!
//! # Multipliers
//!
//! A single matchup is one of `1.6` (super effective), `1.0` (neutral), `0.625` (resisted)
//! or `0.39` (immune). Against a dual-typed defender the two lookups multiply, giving
//! `2.56`, `1.0` (1.6 × 0.625), `0.390625` and so on. Results are rounded to three decimals
//! so threshold comparisons such as `>= 1.6` are not thrown off by floating-point drift.

use serde::Serialize;
use teamforge_data::{
    ElementType, TypeChart,
    type_chart::{IMMUNE, NEUTRAL, NOT_VERY_EFFECTIVE, SUPER_EFFECTIVE},
};

/// Damage bonus for a move matching one of the attacker's types.
pub const STAB_MULTIPLIER: f64 = 1.2;

/// Multiplier for a double weakness (`1.6 × 1.6`).
pub const DOUBLE_SUPER_EFFECTIVE: f64 = 2.56;

const TOLERANCE: f64 = 1e-9;

/// Human-readable bucket for a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessCategory {
    #[display("Double Super Effective")]
    DoubleSuperEffective,
    #[display("Super Effective")]
    SuperEffective,
    #[display("Neutral")]
    Neutral,
    #[display("Resisted")]
    Resisted,
    #[display("Double Resisted")]
    DoubleResisted,
    /// Any other value, e.g. from a custom chart.
    #[display("Mixed")]
    Mixed,
}

impl EffectivenessCategory {
    #[must_use]
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier >= DOUBLE_SUPER_EFFECTIVE - TOLERANCE {
            Self::DoubleSuperEffective
        } else if multiplier >= SUPER_EFFECTIVE - TOLERANCE {
            Self::SuperEffective
        } else if (multiplier - NEUTRAL).abs() < TOLERANCE {
            Self::Neutral
        } else if (IMMUNE - TOLERANCE..=NOT_VERY_EFFECTIVE + TOLERANCE).contains(&multiplier) {
            Self::Resisted
        } else if multiplier < IMMUNE {
            Self::DoubleResisted
        } else {
            Self::Mixed
        }
    }
}

/// Offensive coverage of a set of move types against every defending type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffensiveCoverage {
    /// Defending types some move hits for at least 1.6×.
    pub super_effective: Vec<ElementType>,
    /// Defending types the best move hits for exactly 1.0×.
    pub neutral: Vec<ElementType>,
    /// Everything else.
    pub resisted: Vec<ElementType>,
}

impl OffensiveCoverage {
    /// `|super effective| + 0.5 · |neutral|`, at most 18.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage_score(&self) -> f64 {
        self.super_effective.len() as f64 + 0.5 * self.neutral.len() as f64
    }
}

/// Defensive profile of a team against every attacking type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefensiveCoverage {
    /// Attacking types at least two members resist.
    pub resisted: Vec<ElementType>,
    /// Attacking types at least three members are weak to.
    pub weaknesses: Vec<ElementType>,
}

impl DefensiveCoverage {
    /// `|resisted| − 0.5 · |weaknesses|`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage_score(&self) -> f64 {
        self.resisted.len() as f64 - 0.5 * self.weaknesses.len() as f64
    }
}

/// Rounds a multiplier to three decimals.
#[must_use]
pub fn round_multiplier(multiplier: f64) -> f64 {
    (multiplier * 1000.0).round() / 1000.0
}

/// Whether a move of `move_type` gets the same-type attack bonus.
#[must_use]
pub fn has_stab(move_type: ElementType, own_types: &[ElementType]) -> bool {
    own_types.contains(&move_type)
}

/// Whether `multiplier` counts as a weakness.
#[must_use]
pub fn is_super_effective(multiplier: f64) -> bool {
    multiplier >= SUPER_EFFECTIVE - TOLERANCE
}

/// Whether `multiplier` counts as a resistance.
#[must_use]
pub fn is_resisted(multiplier: f64) -> bool {
    multiplier <= NOT_VERY_EFFECTIVE + TOLERANCE
}

/// Type-effectiveness calculator bound to a chart.
#[derive(Debug, Clone, Copy)]
pub struct TypeEffectiveness<'a> {
    chart: &'a TypeChart,
}

impl<'a> TypeEffectiveness<'a> {
    #[must_use]
    pub fn new(chart: &'a TypeChart) -> Self {
        Self { chart }
    }

    #[must_use]
    pub fn chart(&self) -> &'a TypeChart {
        self.chart
    }

    /// Multiplier of an `attack` move against a defender with `defense` types.
    ///
    /// Lookups for each defending type multiply; an empty type list is neutral.
    #[must_use]
    pub fn effectiveness(&self, attack: ElementType, defense: &[ElementType]) -> f64 {
        let product = defense
            .iter()
            .map(|&defender| self.chart.multiplier(attack, defender))
            .product::<f64>();
        round_multiplier(product)
    }

    /// [`effectiveness`](Self::effectiveness) times the STAB bonus when it applies.
    #[must_use]
    pub fn total_multiplier(
        &self,
        move_type: ElementType,
        attacker: &[ElementType],
        defender: &[ElementType],
    ) -> f64 {
        let stab = if has_stab(move_type, attacker) {
            STAB_MULTIPLIER
        } else {
            1.0
        };
        self.effectiveness(move_type, defender) * stab
    }

    /// Attacking types that hit `defense` for at least 1.6×.
    #[must_use]
    pub fn super_effective_types(&self, defense: &[ElementType]) -> Vec<ElementType> {
        ElementType::ALL
            .into_iter()
            .filter(|&attack| is_super_effective(self.effectiveness(attack, defense)))
            .collect()
    }

    /// Attacking types that `defense` takes at most 0.625× from.
    #[must_use]
    pub fn resistant_types(&self, defense: &[ElementType]) -> Vec<ElementType> {
        ElementType::ALL
            .into_iter()
            .filter(|&attack| is_resisted(self.effectiveness(attack, defense)))
            .collect()
    }

    /// Best achievable multiplier per defending type using any of `move_types`.
    #[must_use]
    pub fn offensive_coverage(&self, move_types: &[ElementType]) -> OffensiveCoverage {
        let mut coverage = OffensiveCoverage::default();
        for defender in ElementType::ALL {
            let best = move_types
                .iter()
                .map(|&attack| self.effectiveness(attack, &[defender]))
                .fold(0.0, f64::max);
            if is_super_effective(best) {
                coverage.super_effective.push(defender);
            } else if (best - NEUTRAL).abs() < TOLERANCE {
                coverage.neutral.push(defender);
            } else {
                coverage.resisted.push(defender);
            }
        }
        coverage
    }

    /// Resistances and stacked weaknesses of a team, one type list per member.
    #[must_use]
    pub fn defensive_coverage(&self, team_types: &[&[ElementType]]) -> DefensiveCoverage {
        let mut coverage = DefensiveCoverage::default();
        for attack in ElementType::ALL {
            let mut resist_count = 0;
            let mut weak_count = 0;
            for types in team_types {
                let m = self.effectiveness(attack, types);
                if is_resisted(m) {
                    resist_count += 1;
                }
                if is_super_effective(m) {
                    weak_count += 1;
                }
            }
            if resist_count >= 2 {
                coverage.resisted.push(attack);
            }
            if weak_count >= 3 {
                coverage.weaknesses.push(attack);
            }
        }
        coverage
    }
}
