use std::collections::BTreeSet;

use teamforge_data::Mode;

use crate::{
    fitness_component::FitnessComponent,
    team_analysis::{Member, TeamAnalysis},
};

const LINEUP_SIZE: usize = 3;

/// How well the team supports a lead / switch / closer lineup.
///
/// The 3-slot format scores its single lineup. The 6-slot format scores every ordered
/// index triple (all 216 of them, repeats included) and keeps the best.
#[derive(Debug, Clone, Copy)]
pub struct StrategyViability;

impl FitnessComponent for StrategyViability {
    fn id(&self) -> &'static str {
        "strategy_viability"
    }

    fn name(&self) -> &'static str {
        "Strategy Viability"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let members = team.members();
        if members.len() < LINEUP_SIZE {
            return 0.0;
        }
        match team.mode() {
            Mode::Ladder => lineup_score(&members[0], &members[1], &members[2]),
            Mode::Tournament => {
                let mut best = 0.0_f64;
                for lead in members {
                    for switch in members {
                        for closer in members {
                            best = best.max(lineup_score(lead, switch, closer));
                        }
                    }
                }
                best
            }
        }
    }
}

/// Scores one `(lead, switch, closer)` lineup, capped at 1.0.
///
/// - ABA: lead and closer share a type (+0.3)
/// - ABB: closer shares a type with the switch (+0.3)
/// - ABC: the three members cover at least five distinct types (+0.4)
#[must_use]
pub fn lineup_score(lead: &Member<'_>, switch: &Member<'_>, closer: &Member<'_>) -> f64 {
    let shares_type = |a: &Member<'_>, b: &Member<'_>| a.types().iter().any(|t| b.types().contains(t));

    let mut score = 0.0;
    if shares_type(lead, closer) {
        score += 0.3;
    }
    if shares_type(switch, closer) {
        score += 0.3;
    }
    let distinct: BTreeSet<_> = [lead, switch, closer]
        .iter()
        .flat_map(|m| m.types().iter().copied())
        .collect();
    if distinct.len() >= 5 {
        score += 0.4;
    }
    f64::min(score, 1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::ElementType::{Dark, Dragon, Fairy, Fire, Flying, Grass, Steel, Water};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    const STATS: (f64, f64, f64) = (100.0, 100.0, 100.0);

    #[test]
    fn test_three_slot_scores_single_lineup() {
        let store = store(
            vec![
                character("a", &[Fire, Flying], STATS),
                character("b", &[Water, Dark], STATS),
                character("c", &[Grass, Fire], STATS),
            ],
            vec![],
            vec![],
        );
        let team = keys(&["a", "b", "c"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        // ABA (fire) + ABC (fire, flying, water, dark, grass)
        assert!((StrategyViability.score(&analysis) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_six_slot_takes_best_triple() {
        let store = store(
            vec![
                character("a", &[Fire], STATS),
                character("b", &[Water], STATS),
                character("c", &[Grass], STATS),
                character("d", &[Steel, Fairy], STATS),
                character("e", &[Dragon, Flying], STATS),
                character("f", &[Dark, Steel], STATS),
            ],
            vec![],
            vec![],
        );
        let team = keys(&["a", "b", "c", "d", "e", "f"]);
        let analysis = TeamAnalysis::new(&store, Mode::Tournament, &team, &BTreeSet::new());
        // (d, e, f): ABA on steel + ABC
        assert!((StrategyViability.score(&analysis) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_members_scores_zero() {
        let store = store(vec![character("a", &[Fire], STATS)], vec![], vec![]);
        let team = keys(&["a", "missing", "missing_too"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        assert!(StrategyViability.score(&analysis).abs() < 1e-9);
    }
}
