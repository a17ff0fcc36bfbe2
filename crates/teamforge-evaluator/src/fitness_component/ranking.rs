use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Mean ranking average over the team, normalized by 100.
#[derive(Debug, Clone, Copy)]
pub struct AverageRanking;

impl FitnessComponent for AverageRanking {
    fn id(&self) -> &'static str {
        "average_ranking"
    }

    fn name(&self) -> &'static str {
        "Average Ranking"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        (team.per_member_mean(|m| m.ranking_average()) / 100.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, ranking, store};

    #[test]
    fn test_missing_ranking_counts_as_zero() {
        let stats = (100.0, 100.0, 100.0);
        let store = store(
            vec![
                character("a", &[ElementType::Fire], stats),
                character("b", &[ElementType::Water], stats),
            ],
            vec![ranking("a", 90.0)],
            vec![],
        );
        let team = keys(&["a", "b"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!((AverageRanking.score(&analysis) - 0.45).abs() < 1e-9);
    }
}
