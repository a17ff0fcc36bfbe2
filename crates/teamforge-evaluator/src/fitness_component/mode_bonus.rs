use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Ladder bonus: rewards off-meta picks.
///
/// Ranking average below 60 gives 0.5 per member and 60..80 gives 0.3. Members without a
/// ranking give nothing.
#[derive(Debug, Clone, Copy)]
pub struct SurpriseFactor;

impl FitnessComponent for SurpriseFactor {
    fn id(&self) -> &'static str {
        "surprise_factor"
    }

    fn name(&self) -> &'static str {
        "Surprise Factor"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let mean = team.per_member_mean(|member| match member.ranking {
            Some(ranking) if ranking.average < 60.0 => 0.5,
            Some(ranking) if ranking.average < 80.0 => 0.3,
            _ => 0.0,
        });
        mean.min(1.0)
    }
}

/// Tournament bonus: rewards proven top-ranked picks.
#[derive(Debug, Clone, Copy)]
pub struct Consistency;

impl FitnessComponent for Consistency {
    fn id(&self) -> &'static str {
        "consistency"
    }

    fn name(&self) -> &'static str {
        "Consistency"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        team.per_member_mean(|member| {
            let average = member.ranking_average();
            if average >= 85.0 {
                1.0
            } else if average >= 75.0 {
                0.5
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType::*, InMemoryStore, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, ranking, store};

    const STATS: (f64, f64, f64) = (100.0, 100.0, 100.0);

    fn fixture() -> InMemoryStore {
        store(
            vec![
                character("top", &[Fire], STATS),
                character("good", &[Water], STATS),
                character("mid", &[Grass], STATS),
                character("low", &[Ice], STATS),
                character("unranked", &[Rock], STATS),
            ],
            vec![
                ranking("top", 90.0),
                ranking("good", 80.0),
                ranking("mid", 70.0),
                ranking("low", 40.0),
            ],
            vec![],
        )
    }

    #[test]
    fn test_surprise_factor() {
        let store = fixture();
        let team = keys(&["mid", "low", "unranked"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!((SurpriseFactor.score(&analysis) - 0.8 / 3.0).abs() < 1e-9);

        let team = keys(&["top", "good"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!(SurpriseFactor.score(&analysis).abs() < 1e-9);
    }

    #[test]
    fn test_consistency() {
        let store = fixture();
        let team = keys(&["top", "good", "mid", "unranked"]);
        let analysis = TeamAnalysis::new(&store, Mode::Tournament, &team, &BTreeSet::new());
        assert!((Consistency.score(&analysis) - 1.5 / 4.0).abs() < 1e-9);
    }
}
