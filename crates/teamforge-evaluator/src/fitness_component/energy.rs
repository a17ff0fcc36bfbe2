use teamforge_data::{Move, MoveKind};

use crate::{
    effectiveness::has_stab,
    fitness_component::FitnessComponent,
    team_analysis::{Member, TeamAnalysis},
};

/// Maximum move-pair synergy points.
const MAX_PAIR_SYNERGY: f64 = 3.5;
/// Charged moves at or below this cost count as cheap (bait) moves.
const CHEAP_MOVE_ENERGY: u32 = 45;
/// Reaching the first charged move within this many turns gives full pressure.
const PRESSURE_TURNS: f64 = 8.0;

/// How well each member's moveset converts energy into charged-move pressure.
///
/// Per member, the mean of the move-pair synergy (normalized by 3.5) and the charge-speed
/// pressure (capped at 1.0); averaged over the team.
#[derive(Debug, Clone, Copy)]
pub struct EnergyBreakpoints;

impl FitnessComponent for EnergyBreakpoints {
    fn id(&self) -> &'static str {
        "energy_breakpoints"
    }

    fn name(&self) -> &'static str {
        "Energy Breakpoints"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        team.per_member_mean(|member| {
            let synergy = pair_synergy(member) / MAX_PAIR_SYNERGY;
            let pressure = charge_pressure(member);
            (synergy + pressure) / 2.0
        })
    }
}

fn best_fast_move<'a>(member: &Member<'a>) -> Option<&'a Move> {
    member
        .fast_moves
        .iter()
        .copied()
        .filter(|m| m.energy_per_turn().is_some())
        .max_by(|a, b| {
            let a = a.energy_per_turn().unwrap_or(0.0);
            let b = b.energy_per_turn().unwrap_or(0.0);
            a.total_cmp(&b)
        })
}

/// The cheapest charged move and the most powerful of the others.
fn charged_pair<'a>(member: &Member<'a>) -> Option<(&'a Move, Option<&'a Move>)> {
    let cheapest = member
        .charged_moves
        .iter()
        .copied()
        .min_by_key(|m| m.energy_cost().unwrap_or(u32::MAX))?;
    let partner = member
        .charged_moves
        .iter()
        .copied()
        .filter(|m| m.key != cheapest.key)
        .max_by(|a, b| a.power.total_cmp(&b.power));
    Some((cheapest, partner))
}

fn pair_synergy(member: &Member<'_>) -> f64 {
    let Some((cheapest, partner)) = charged_pair(member) else {
        return 0.0;
    };
    let pair: Vec<&Move> = [Some(cheapest), partner].into_iter().flatten().collect();

    let mut points = 0.0;
    if partner.is_some_and(|p| p.move_type != cheapest.move_type) {
        points += 1.0;
    }
    if cheapest
        .energy_cost()
        .is_some_and(|cost| cost <= CHEAP_MOVE_ENERGY)
    {
        points += 1.0;
    }
    if pair.iter().any(|m| m.buffs().is_some()) {
        points += 0.5;
    }
    if pair.iter().any(|m| has_stab(m.move_type, member.types())) {
        points += 0.5;
    }
    if best_fast_move(member).is_some_and(|fast| has_stab(fast.move_type, member.types())) {
        points += 0.5;
    }
    points
}

fn charge_pressure(member: &Member<'_>) -> f64 {
    let (Some(fast), Some((cheapest, _))) = (best_fast_move(member), charged_pair(member)) else {
        return 0.0;
    };
    let MoveKind::Fast { energy_gain, turns } = fast.kind else {
        return 0.0;
    };
    let Some(cost) = cheapest.energy_cost() else {
        return 0.0;
    };
    if energy_gain == 0 {
        return 0.0;
    }
    let total_turns = cost.div_ceil(energy_gain) * turns;
    if total_turns == 0 {
        return 1.0;
    }
    (PRESSURE_TURNS / f64::from(total_turns)).min(1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    #[test]
    fn test_single_member_score() {
        let store = store(
            vec![character("a", &[ElementType::Fire], (100.0, 100.0, 100.0))],
            vec![],
            vec![],
        );
        let team = keys(&["a"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        let member = &analysis.members()[0];

        // charged STAB + fast STAB
        assert!((pair_synergy(member) - 1.0).abs() < 1e-9);
        // ceil(50 / 4) = 13 turns
        assert!((charge_pressure(member) - 8.0 / 13.0).abs() < 1e-9);

        let expected = (1.0 / 3.5 + 8.0 / 13.0) / 2.0;
        assert!((EnergyBreakpoints.score(&analysis) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_member_dilutes_score() {
        let store = store(
            vec![character("a", &[ElementType::Fire], (100.0, 100.0, 100.0))],
            vec![],
            vec![],
        );
        let anchors = BTreeSet::new();
        let solo = keys(&["a"]);
        let with_unknown = keys(&["a", "missing"]);
        let solo = EnergyBreakpoints.score(&TeamAnalysis::new(&store, Mode::Ladder, &solo, &anchors));
        let diluted = EnergyBreakpoints.score(&TeamAnalysis::new(
            &store,
            Mode::Ladder,
            &with_unknown,
            &anchors,
        ));
        assert!((diluted - solo / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_synthetic_movesets_stay_in_range() {
        use teamforge_data::{InMemoryStore, synthetic::SyntheticKnowledgeBase};

        let store = InMemoryStore::new(SyntheticKnowledgeBase::new(18).build()).unwrap();
        let team: Vec<String> = store.characters().iter().map(|c| c.key.clone()).collect();
        let analysis = TeamAnalysis::new(&store, Mode::Tournament, &team, &BTreeSet::new());
        for member in analysis.members() {
            let synergy = pair_synergy(member);
            assert!((0.0..=MAX_PAIR_SYNERGY).contains(&synergy));
            assert!((0.0..=1.0).contains(&charge_pressure(member)));
        }
    }
}
