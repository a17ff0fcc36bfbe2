use crate::{
    effectiveness::is_super_effective, fitness_component::FitnessComponent,
    team_analysis::TeamAnalysis,
};

/// Number of top-ranked threats considered.
pub const META_THREAT_LIMIT: usize = 50;

/// Fraction of the top meta threats some member hits super effectively with a charged move.
#[derive(Debug, Clone, Copy)]
pub struct MetaThreatCoverage;

impl FitnessComponent for MetaThreatCoverage {
    fn id(&self) -> &'static str {
        "meta_threat_coverage"
    }

    fn name(&self) -> &'static str {
        "Meta Threat Coverage"
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let threats = team.store().meta_threats();
        let threats = &threats[..threats.len().min(META_THREAT_LIMIT)];
        if threats.is_empty() {
            return 0.0;
        }

        let eff = team.effectiveness();
        let covered = threats
            .iter()
            .filter(|threat| {
                team.members().iter().any(|member| {
                    member.charged_moves.iter().any(|mv| {
                        is_super_effective(eff.effectiveness(mv.move_type, &threat.types))
                    })
                })
            })
            .count();
        covered as f64 / threats.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use arrayvec::ArrayVec;
    use teamforge_data::{ElementType, MetaThreat, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    fn threat(key: &str, types: &[ElementType]) -> MetaThreat {
        MetaThreat {
            key: key.to_owned(),
            name: key.to_owned(),
            types: types.iter().copied().collect::<ArrayVec<_, 2>>(),
        }
    }

    #[test]
    fn test_fraction_of_threats_covered() {
        let store = store(
            vec![character("a", &[ElementType::Fire], (100.0, 100.0, 100.0))],
            vec![],
            vec![
                threat("t1", &[ElementType::Grass]),
                threat("t2", &[ElementType::Water]),
                threat("t3", &[ElementType::Steel, ElementType::Flying]),
                threat("t4", &[ElementType::Dragon]),
            ],
        );
        let team = keys(&["a"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!((MetaThreatCoverage.score(&analysis) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_threats_scores_zero() {
        let store = store(
            vec![character("a", &[ElementType::Fire], (100.0, 100.0, 100.0))],
            vec![],
            vec![],
        );
        let team = keys(&["a"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!(MetaThreatCoverage.score(&analysis).abs() < 1e-9);
    }
}
