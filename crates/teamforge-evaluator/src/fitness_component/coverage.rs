use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Normalizer for offensive coverage (one point per defending type).
const OFFENSIVE_SCALE: f64 = 18.0;
/// Normalizer for defensive coverage.
const DEFENSIVE_SCALE: f64 = 10.0;

/// Offensive coverage of the team's charged moves combined with the defensive coverage
/// of its own types: `0.6 · offensive + 0.4 · defensive`.
#[derive(Debug, Clone, Copy)]
pub struct TypeCoverage;

impl FitnessComponent for TypeCoverage {
    fn id(&self) -> &'static str {
        "type_coverage"
    }

    fn name(&self) -> &'static str {
        "Type Coverage"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let eff = team.effectiveness();
        let offensive = eff
            .offensive_coverage(&team.charged_move_types())
            .coverage_score();
        let defensive = eff
            .defensive_coverage(&team.member_types())
            .coverage_score();
        0.6 * (offensive / OFFENSIVE_SCALE).clamp(0.0, 1.0)
            + 0.4 * (defensive / DEFENSIVE_SCALE).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    #[test]
    fn test_empty_team_scores_zero() {
        let store = store(vec![], vec![], vec![]);
        let team = TeamAnalysis::new(&store, Mode::Ladder, &[], &BTreeSet::new());
        assert!(TypeCoverage.score(&team).abs() < 1e-9);
    }

    #[test]
    fn test_varied_team_beats_monotype_team() {
        let stats = (100.0, 100.0, 100.0);
        let store = store(
            vec![
                character("a", &[ElementType::Grass], stats),
                character("b", &[ElementType::Grass], stats),
                character("c", &[ElementType::Grass], stats),
                character("d", &[ElementType::Fire], stats),
                character("e", &[ElementType::Water], stats),
            ],
            vec![],
            vec![],
        );
        let mono = keys(&["a", "b", "c"]);
        let varied = keys(&["a", "d", "e"]);
        let anchors = BTreeSet::new();
        let mono_score = TypeCoverage.score(&TeamAnalysis::new(&store, Mode::Ladder, &mono, &anchors));
        let varied_score =
            TypeCoverage.score(&TeamAnalysis::new(&store, Mode::Ladder, &varied, &anchors));
        assert!(varied_score > mono_score);
        assert!((0.0..=1.0).contains(&varied_score));
    }
}
