//! Independent scoring components of the team fitness.
//!
//! Each component looks at a [`TeamAnalysis`] and returns a score normalized to roughly
//! \[0.0, 1.0\] (higher is better). The [`FitnessEvaluator`](crate::FitnessEvaluator)
//! combines them as a weighted sum:
//!
//! | Component | Weight |
//! |---|---|
//! | [`TypeCoverage`] | 0.25 |
//! | [`AverageRanking`] | 0.15 |
//! | [`StrategyViability`] | 0.10 |
//! | [`MetaThreatCoverage`] | 0.05 |
//! | [`EnergyBreakpoints`] | 0.05 |
//! | [`TypeDiversity`] | 0.08 |
//! | [`TypeSynergy`] | 0.20 |
//! | [`StatBalance`] | 0.12 |
//! | [`ShadowPreference`] | 0.08 |
//!
//! On top of that, a mode-specific bonus applies ([`SurpriseFactor`] at 0.15 for
//! [`Mode::Ladder`], [`Consistency`] at 0.10 for [`Mode::Tournament`]), plus
//! [`AnchorSynergy`] at 0.5 when the team has anchors. The total is deliberately not
//! re-normalized and can exceed 1.0.

use std::fmt;

use teamforge_data::Mode;

use crate::team_analysis::TeamAnalysis;

pub use self::{
    anchor::AnchorSynergy, balance::StatBalance, coverage::TypeCoverage,
    diversity::TypeDiversity, energy::EnergyBreakpoints, meta_threat::MetaThreatCoverage,
    mode_bonus::{Consistency, SurpriseFactor},
    ranking::AverageRanking, shadow::ShadowPreference, strategy::StrategyViability,
    synergy::TypeSynergy,
};

mod anchor;
mod balance;
mod coverage;
mod diversity;
mod energy;
mod meta_threat;
mod mode_bonus;
mod ranking;
mod shadow;
mod strategy;
mod synergy;

/// Weight applied to [`AnchorSynergy`] when at least one anchor exists.
pub const ANCHOR_SYNERGY_WEIGHT: f64 = 0.5;

/// One scoring criterion.
pub trait FitnessComponent: fmt::Debug + Send + Sync {
    /// Stable identifier used in reports.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Scores the team, roughly in \[0.0, 1.0\].
    fn score(&self, team: &TeamAnalysis<'_>) -> f64;
}

pub type BoxedFitnessComponent = Box<dyn FitnessComponent>;

/// A component together with its weight in the total.
#[derive(Debug)]
pub struct WeightedComponent {
    pub component: BoxedFitnessComponent,
    pub weight: f64,
}

impl WeightedComponent {
    #[must_use]
    pub fn new<C>(component: C, weight: f64) -> Self
    where
        C: FitnessComponent + 'static,
    {
        Self {
            component: Box::new(component),
            weight,
        }
    }
}

/// The weighted base components, shared by every mode.
#[must_use]
pub fn base_components() -> Vec<WeightedComponent> {
    vec![
        WeightedComponent::new(TypeCoverage, 0.25),
        WeightedComponent::new(AverageRanking, 0.15),
        WeightedComponent::new(StrategyViability, 0.10),
        WeightedComponent::new(MetaThreatCoverage, 0.05),
        WeightedComponent::new(EnergyBreakpoints, 0.05),
        WeightedComponent::new(TypeDiversity, 0.08),
        WeightedComponent::new(TypeSynergy, 0.20),
        WeightedComponent::new(StatBalance, 0.12),
        WeightedComponent::new(ShadowPreference, 0.08),
    ]
}

/// The bonus component for `mode`.
#[must_use]
pub fn mode_bonus(mode: Mode) -> WeightedComponent {
    match mode {
        Mode::Ladder => WeightedComponent::new(SurpriseFactor, 0.15),
        Mode::Tournament => WeightedComponent::new(Consistency, 0.10),
    }
}
