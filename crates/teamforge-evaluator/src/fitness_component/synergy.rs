use teamforge_data::ElementType;

use crate::{
    effectiveness::{is_resisted, is_super_effective},
    fitness_component::FitnessComponent,
    team_analysis::{Member, TeamAnalysis},
};

/// Penalizes weaknesses shared across the team and rewards teammates that resist each
/// other's weaknesses.
///
/// Starts at 1.0. For each attacking type, −0.4 if four or more members are weak to it,
/// −0.25 for three, −0.1 for two. Then +0.3 × the mean share of each member's weaknesses
/// that some teammate resists. Clamped to \[0.0, 1.0\].
#[derive(Debug, Clone, Copy)]
pub struct TypeSynergy;

impl FitnessComponent for TypeSynergy {
    fn id(&self) -> &'static str {
        "type_synergy"
    }

    fn name(&self) -> &'static str {
        "Type Synergy"
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let members = team.members();
        if members.is_empty() {
            return 0.0;
        }
        let eff = team.effectiveness();

        let penalty: f64 = ElementType::ALL
            .into_iter()
            .map(|attack| {
                let weak = members
                    .iter()
                    .filter(|m| is_super_effective(eff.effectiveness(attack, m.types())))
                    .count();
                match weak {
                    0 | 1 => 0.0,
                    2 => 0.1,
                    3 => 0.25,
                    _ => 0.4,
                }
            })
            .sum();

        let mean_cover = members
            .iter()
            .map(|m| weakness_cover_ratio(team, m))
            .sum::<f64>()
            / members.len() as f64;

        (1.0 - penalty + 0.3 * mean_cover).clamp(0.0, 1.0)
    }
}

/// Share of `member`'s weaknesses resisted by at least one teammate; 1.0 if it has none.
#[expect(clippy::cast_precision_loss)]
fn weakness_cover_ratio(team: &TeamAnalysis<'_>, member: &Member<'_>) -> f64 {
    let eff = team.effectiveness();
    let weaknesses = eff.super_effective_types(member.types());
    if weaknesses.is_empty() {
        return 1.0;
    }
    let covered = weaknesses
        .iter()
        .filter(|&&attack| {
            team.members()
                .iter()
                .filter(|other| other.index != member.index)
                .any(|other| is_resisted(eff.effectiveness(attack, other.types())))
        })
        .count();
    covered as f64 / weaknesses.len() as f64
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType::*, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    const STATS: (f64, f64, f64) = (100.0, 100.0, 100.0);

    #[test]
    fn test_stacked_weaknesses_score_lower() {
        let store = store(
            vec![
                character("g1", &[Grass], STATS),
                character("g2", &[Grass], STATS),
                character("g3", &[Grass], STATS),
                character("fire", &[Fire], STATS),
                character("water", &[Water], STATS),
            ],
            vec![],
            vec![],
        );
        let anchors = BTreeSet::new();
        let stacked = keys(&["g1", "g2", "g3"]);
        let mixed = keys(&["g1", "fire", "water"]);
        let stacked = TypeSynergy.score(&TeamAnalysis::new(&store, Mode::Ladder, &stacked, &anchors));
        let mixed = TypeSynergy.score(&TeamAnalysis::new(&store, Mode::Ladder, &mixed, &anchors));
        // grass is weak to fire, ice, poison, flying, bug: five types at three members each
        assert!(stacked.abs() < 1e-9);
        assert!(mixed > stacked);
        assert!((0.0..=1.0).contains(&mixed));
    }

    #[test]
    fn test_cover_ratio() {
        let store = store(
            vec![
                character("steel", &[Steel], STATS),
                character("water", &[Water], STATS),
            ],
            vec![],
            vec![],
        );
        let team = keys(&["steel", "water"]);
        let analysis = TeamAnalysis::new(&store, Mode::Ladder, &team, &BTreeSet::new());
        let steel = &analysis.members()[0];
        // steel is weak to fire, fighting, ground; water resists fire only
        assert!((weakness_cover_ratio(&analysis, steel) - 1.0 / 3.0).abs() < 1e-9);
    }
}
