//! Team fitness: weighted sum of the fitness components.
//!
//! ```text
//! total = Σ(wᵢ × componentᵢ) + w_mode × mode_bonus [+ 0.5 × anchor_synergy]
//! ```
//!
//! The anchor term is only added when the team has at least one anchor. The total is
//! not re-normalized, so teams with anchors can score above 1.0.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use teamforge_data::{InMemoryStore, Mode, synthetic::SyntheticKnowledgeBase};
//! use teamforge_evaluator::FitnessEvaluator;
//!
//! let store = InMemoryStore::new(SyntheticKnowledgeBase::new(10).build()).unwrap();
//! let evaluator = FitnessEvaluator::new(Mode::Ladder);
//! let team = ["species_001", "species_002", "species_003"].map(String::from);
//! let fitness = evaluator.evaluate(&store, &team, &BTreeSet::new());
//! assert!(fitness.is_finite() && fitness >= 0.0);
//! ```

use std::collections::BTreeSet;

use serde::Serialize;
use teamforge_data::{KnowledgeStore, Mode};

use crate::{
    fitness_component::{
        ANCHOR_SYNERGY_WEIGHT, AnchorSynergy, FitnessComponent as _, WeightedComponent,
        base_components, mode_bonus,
    },
    team_analysis::TeamAnalysis,
};

/// Scores teams for one [`Mode`].
#[derive(Debug)]
pub struct FitnessEvaluator {
    mode: Mode,
    components: Vec<WeightedComponent>,
    mode_bonus: WeightedComponent,
    anchor: WeightedComponent,
}

/// Raw score and weight of one component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentScore {
    pub id: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
}

impl ComponentScore {
    fn new(weighted: &WeightedComponent, team: &TeamAnalysis<'_>) -> Self {
        Self {
            id: weighted.component.id(),
            name: weighted.component.name(),
            weight: weighted.weight,
            score: weighted.component.score(team),
        }
    }

    /// `weight × score`
    #[must_use]
    pub fn contribution(&self) -> f64 {
        self.weight * self.score
    }
}

/// Every term of a team's fitness.
#[derive(Debug, Clone, Serialize)]
pub struct FitnessBreakdown {
    pub components: Vec<ComponentScore>,
    pub mode_bonus: ComponentScore,
    /// Present only when the team has anchors.
    pub anchor_synergy: Option<ComponentScore>,
    pub total: f64,
}

impl FitnessEvaluator {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            components: base_components(),
            mode_bonus: mode_bonus(mode),
            anchor: WeightedComponent::new(AnchorSynergy, ANCHOR_SYNERGY_WEIGHT),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fitness of `team`, where `anchors` holds locked slot indices.
    #[must_use]
    pub fn evaluate(
        &self,
        store: &dyn KnowledgeStore,
        team: &[String],
        anchors: &BTreeSet<usize>,
    ) -> f64 {
        let analysis = TeamAnalysis::new(store, self.mode, team, anchors);
        let mut total: f64 = self
            .components
            .iter()
            .chain([&self.mode_bonus])
            .map(|c| c.weight * c.component.score(&analysis))
            .sum();
        if !anchors.is_empty() {
            total += self.anchor.weight * self.anchor.component.score(&analysis);
        }
        total
    }

    /// Like [`evaluate`](Self::evaluate), keeping every term.
    #[must_use]
    pub fn breakdown(
        &self,
        store: &dyn KnowledgeStore,
        team: &[String],
        anchors: &BTreeSet<usize>,
    ) -> FitnessBreakdown {
        let analysis = TeamAnalysis::new(store, self.mode, team, anchors);
        let components: Vec<_> = self
            .components
            .iter()
            .map(|c| ComponentScore::new(c, &analysis))
            .collect();
        let mode_bonus = ComponentScore::new(&self.mode_bonus, &analysis);
        let anchor_synergy =
            (!anchors.is_empty()).then(|| ComponentScore::new(&self.anchor, &analysis));
        let total = components
            .iter()
            .chain([&mode_bonus])
            .chain(&anchor_synergy)
            .map(ComponentScore::contribution)
            .sum();
        FitnessBreakdown {
            components,
            mode_bonus,
            anchor_synergy,
            total,
        }
    }
}
